//! Local key-value storage persisted as a single JSON document.

use anyhow::Context;
use chrono::Utc;
use football_api::TeamRef;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const STORAGE_FILE: &str = "storage.json";

pub const KEY_SESSION: &str = "rs_session";
pub const KEY_FAV_TEAMS: &str = "rs_fav_teams";
pub const KEY_FAV_MATCHES: &str = "rs_fav_matches";
pub const KEY_SUPPORT: &str = "rs_support";
pub const KEY_NOTIF_ON: &str = "rs_notif_on";
pub const KEY_COLLAPSED: &str = "rs_collapsed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    #[serde(default)]
    pub uid: Option<String>,
    /// Sign-in time, milliseconds since the epoch.
    pub ts: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Support,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketMessage {
    pub from: Author,
    pub text: String,
    pub ts: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub email: String,
    pub status: TicketStatus,
    pub created_at: i64,
    pub messages: Vec<TicketMessage>,
}

/// JSON-file backed store. Every mutation is flushed with a write to a
/// temporary file followed by a rename.
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    data: Map<String, Value>,
}

impl LocalStorage {
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(STORAGE_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("ignoring unreadable {}: {e}", path.display());
                Map::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`; `None` when absent or of another shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.data.get(key)?.clone();
        serde_json::from_value(value).ok()
    }

    /// Memory only changes once the file write went through.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> anyhow::Result<()> {
        let value = serde_json::to_value(value).with_context(|| format!("encode {key}"))?;
        let mut next = self.data.clone();
        next.insert(key.to_owned(), value);
        self.commit(next)
    }

    pub fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        if !self.data.contains_key(key) {
            return Ok(());
        }
        let mut next = self.data.clone();
        next.remove(key);
        self.commit(next)
    }

    fn commit(&mut self, next: Map<String, Value>) -> anyhow::Result<()> {
        self.write(&next)?;
        self.data = next;
        Ok(())
    }

    fn write(&self, data: &Map<String, Value>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let payload = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, payload).with_context(|| format!("write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    pub fn session(&self) -> Option<Session> {
        self.get(KEY_SESSION)
    }

    pub fn set_session(&mut self, email: &str) -> anyhow::Result<Session> {
        let session = Session {
            email: email.trim().to_owned(),
            uid: None,
            ts: now_ms(),
        };
        self.set(KEY_SESSION, &session)?;
        Ok(session)
    }

    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.remove(KEY_SESSION)
    }

    // -----------------------------------------------------------------------
    // Favorites
    // -----------------------------------------------------------------------

    pub fn fav_teams(&self) -> Vec<TeamRef> {
        self.get(KEY_FAV_TEAMS).unwrap_or_default()
    }

    pub fn is_fav_team(&self, team_id: &str) -> bool {
        self.fav_teams().iter().any(|t| t.id == team_id)
    }

    /// Adds or removes `team`. Returns true when the team is now a favorite.
    pub fn toggle_fav_team(&mut self, team: &TeamRef) -> anyhow::Result<bool> {
        let mut favs = self.fav_teams();
        let added = if favs.iter().any(|t| t.id == team.id) {
            favs.retain(|t| t.id != team.id);
            false
        } else {
            favs.push(team.clone());
            true
        };
        self.set(KEY_FAV_TEAMS, &favs)?;
        Ok(added)
    }

    pub fn fav_matches(&self) -> Vec<String> {
        self.get(KEY_FAV_MATCHES).unwrap_or_default()
    }

    pub fn is_fav_match(&self, match_id: &str) -> bool {
        self.fav_matches().iter().any(|id| id == match_id)
    }

    pub fn toggle_fav_match(&mut self, match_id: &str) -> anyhow::Result<bool> {
        let mut favs = self.fav_matches();
        let added = if favs.iter().any(|id| id == match_id) {
            favs.retain(|id| id != match_id);
            false
        } else {
            favs.push(match_id.to_owned());
            true
        };
        self.set(KEY_FAV_MATCHES, &favs)?;
        Ok(added)
    }

    // -----------------------------------------------------------------------
    // Support tickets
    // -----------------------------------------------------------------------

    /// Newest first.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.get(KEY_SUPPORT).unwrap_or_default()
    }

    pub fn create_ticket(&mut self, subject: &str, body: &str, email: &str) -> anyhow::Result<Ticket> {
        let now = now_ms();
        let ticket = Ticket {
            id: format!("TKT-{now}"),
            subject: subject.to_owned(),
            body: body.to_owned(),
            email: email.to_owned(),
            status: TicketStatus::Open,
            created_at: now,
            messages: vec![TicketMessage {
                from: Author::User,
                text: body.to_owned(),
                ts: now,
            }],
        };
        let mut tickets = self.tickets();
        tickets.insert(0, ticket.clone());
        self.set(KEY_SUPPORT, &tickets)?;
        Ok(ticket)
    }

    /// Appends a message. A message from the user re-opens the ticket.
    pub fn add_message(&mut self, ticket_id: &str, text: &str, from: Author) -> anyhow::Result<Option<Ticket>> {
        let mut tickets = self.tickets();
        let Some(ticket) = tickets.iter_mut().find(|t| t.id == ticket_id) else {
            return Ok(None);
        };
        ticket.messages.push(TicketMessage {
            from,
            text: text.to_owned(),
            ts: now_ms(),
        });
        if from == Author::User {
            ticket.status = TicketStatus::Open;
        }
        let updated = ticket.clone();
        self.set(KEY_SUPPORT, &tickets)?;
        Ok(Some(updated))
    }

    pub fn close_ticket(&mut self, ticket_id: &str) -> anyhow::Result<()> {
        let mut tickets = self.tickets();
        if let Some(ticket) = tickets.iter_mut().find(|t| t.id == ticket_id) {
            ticket.status = TicketStatus::Closed;
            self.set(KEY_SUPPORT, &tickets)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // UI preferences
    // -----------------------------------------------------------------------

    /// Notifications are on unless explicitly turned off.
    pub fn notif_on(&self) -> bool {
        self.get(KEY_NOTIF_ON).unwrap_or(true)
    }

    pub fn set_notif_on(&mut self, on: bool) -> anyhow::Result<()> {
        self.set(KEY_NOTIF_ON, &on)
    }

    pub fn collapsed_leagues(&self) -> Vec<String> {
        self.get(KEY_COLLAPSED).unwrap_or_default()
    }

    pub fn set_collapsed_leagues(&mut self, league_ids: &[String]) -> anyhow::Result<()> {
        self.set(KEY_COLLAPSED, &league_ids)
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("roxyscore-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn team(id: &str) -> TeamRef {
        TeamRef {
            id: id.into(),
            name: id.to_uppercase(),
            short_code: id.to_uppercase(),
            ..TeamRef::default()
        }
    }

    #[test]
    fn values_survive_reopen() {
        let dir = scratch_dir("reopen");
        let mut storage = LocalStorage::open(&dir).unwrap();
        storage.set_session("fan@example.com").unwrap();
        storage.set_collapsed_leagues(&["39".to_owned()]).unwrap();

        let reopened = LocalStorage::open(&dir).unwrap();
        assert_eq!(reopened.session().map(|s| s.email), Some("fan@example.com".into()));
        assert_eq!(reopened.collapsed_leagues(), vec!["39".to_owned()]);
        assert!(!dir.join("storage.json.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = scratch_dir("failed-write");
        let mut storage = LocalStorage::open(&dir).unwrap();
        storage.set_session("fan@example.com").unwrap();

        std::fs::create_dir_all(dir.join("storage.json.tmp")).unwrap();
        assert!(storage.set_notif_on(false).is_err());
        assert!(storage.notif_on());
        assert!(storage.logout().is_err());
        assert!(storage.session().is_some());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(STORAGE_FILE), "{not json").unwrap();

        let storage = LocalStorage::open(&dir).unwrap();
        assert!(storage.session().is_none());
        assert!(storage.notif_on());
    }

    #[test]
    fn logout_clears_session() {
        let dir = scratch_dir("logout");
        let mut storage = LocalStorage::open(&dir).unwrap();
        storage.set_session("fan@example.com").unwrap();
        storage.logout().unwrap();
        assert!(storage.session().is_none());
    }

    #[test]
    fn favorites_toggle() {
        let mut storage = LocalStorage::open(&scratch_dir("favs")).unwrap();

        assert!(storage.toggle_fav_team(&team("gs")).unwrap());
        assert!(storage.toggle_fav_team(&team("fb")).unwrap());
        assert!(storage.is_fav_team("gs"));
        assert!(!storage.toggle_fav_team(&team("gs")).unwrap());
        assert_eq!(storage.fav_teams(), vec![team("fb")]);

        assert!(storage.toggle_fav_match("sl1").unwrap());
        assert!(storage.is_fav_match("sl1"));
        assert!(!storage.toggle_fav_match("sl1").unwrap());
        assert!(storage.fav_matches().is_empty());
    }

    #[test]
    fn ticket_lifecycle() {
        let mut storage = LocalStorage::open(&scratch_dir("tickets")).unwrap();
        let ticket = storage
            .create_ticket("Skor yanlış", "GS-FB skoru güncellenmedi", "fan@example.com")
            .unwrap();
        assert!(ticket.id.starts_with("TKT-"));
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.messages.len(), 1);
        assert_eq!(ticket.messages[0].from, Author::User);

        storage.close_ticket(&ticket.id).unwrap();
        assert_eq!(storage.tickets()[0].status, TicketStatus::Closed);

        let replied = storage
            .add_message(&ticket.id, "Düzeltildi", Author::Support)
            .unwrap()
            .unwrap();
        assert_eq!(replied.status, TicketStatus::Closed);

        let reopened = storage
            .add_message(&ticket.id, "Hâlâ yanlış", Author::User)
            .unwrap()
            .unwrap();
        assert_eq!(reopened.status, TicketStatus::Open);
        assert_eq!(reopened.messages.len(), 3);

        assert!(storage.add_message("TKT-0", "?", Author::User).unwrap().is_none());
    }

    #[test]
    fn notifications_default_on() {
        let mut storage = LocalStorage::open(&scratch_dir("notif")).unwrap();
        assert!(storage.notif_on());
        storage.set_notif_on(false).unwrap();
        assert!(!storage.notif_on());
    }
}
