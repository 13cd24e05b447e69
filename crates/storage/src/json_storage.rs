//! JSON file storage implementation.
//!
//! Members live in `members/<id>.json`, one document per member. Each
//! competition period is a single `competition/<yyyy-mm>.json` object keyed
//! by member id, mirroring how the point-of-sale system exports it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use canteen_core::{
    records_from_document, records_to_document, BirthDate, CompetitionRecord, Member, MemberId,
    Period,
};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::subscription::{MemberSubscription, SubscriptionRegistry};
use super::{MemberStore, Result, StorageError};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
    writes: Mutex<()>,
    subscriptions: Arc<SubscriptionRegistry>,
}

impl JsonStorage {
    /// Open storage under `root`, creating the directory layout if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("members")).await?;
        fs::create_dir_all(root.join("competition")).await?;
        debug!(root = %root.display(), "json storage opened");

        Ok(Self {
            root,
            writes: Mutex::new(()),
            subscriptions: SubscriptionRegistry::new(),
        })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of members with at least one open subscription.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.active()
    }

    /// Re-read every watched member and notify watchers of documents that
    /// changed on disk, e.g. points written by another process. Returns the
    /// number of members whose watchers were notified.
    pub async fn refresh_subscriptions(&self) -> Result<usize> {
        let _guard = self.writes.lock().await;
        let mut notified = 0;
        for id in self.subscriptions.watched() {
            if let Some(member) = self.load_member(&id).await? {
                if self.subscriptions.publish_if_changed(&member) {
                    notified += 1;
                }
            }
        }
        if notified > 0 {
            debug!(notified, "subscriptions refreshed from disk");
        }
        Ok(notified)
    }

    /// Create-only write of a new member document. Callers hold `writes`.
    ///
    /// The document is written to a temporary file and hard-linked into
    /// place, so the final path is either absent or complete and an existing
    /// document is never replaced.
    async fn create_member(&self, member: &Member) -> Result<()> {
        let path = self.member_path(&member.id)?;
        let json = serde_json::to_string_pretty(member)?;

        let tmp = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, json.as_bytes()).await {
            fs::remove_file(&tmp).await.ok();
            return Err(e.into());
        }
        let linked = fs::hard_link(&tmp, &path).await;
        if let Err(e) = fs::remove_file(&tmp).await {
            warn!(path = %tmp.display(), error = %e, "failed to remove temporary document");
        }
        match linked {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::Conflict(format!("member {}", member.id)));
            }
            Err(e) => return Err(e.into()),
        }

        info!(member = %member.id, category = %member.category(), "member inserted");
        self.subscriptions.publish(member);
        Ok(())
    }

    fn member_path(&self, id: &MemberId) -> Result<PathBuf> {
        let raw = id.as_str();
        if raw.is_empty() || raw.contains(['/', '\\']) || raw.starts_with('.') {
            return Err(StorageError::NotFound(format!("member {raw}")));
        }
        Ok(self.root.join("members").join(format!("{raw}.json")))
    }

    fn competition_path(&self, period: Period) -> PathBuf {
        self.root.join("competition").join(format!("{}.json", period.key()))
    }
}

#[async_trait::async_trait]
impl MemberStore for JsonStorage {
    async fn find_members(&self, full_name: &str, date_of_birth: &BirthDate) -> Result<Vec<Member>> {
        let members = self.list_members().await?;
        let matched: Vec<Member> = members
            .into_iter()
            .filter(|m| m.matches_identity(full_name, date_of_birth))
            .collect();
        debug!(matches = matched.len(), "member identity query");
        Ok(matched)
    }

    async fn load_member(&self, id: &MemberId) -> Result<Option<Member>> {
        read_json(&self.member_path(id)?).await
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        let mut members: Vec<Member> = list_dir(&self.root.join("members")).await?;
        members.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(members)
    }

    async fn insert_member(&self, member: &Member) -> Result<()> {
        let _guard = self.writes.lock().await;
        self.create_member(member).await
    }

    async fn insert_unique_identity(&self, member: &Member) -> Result<()> {
        let _guard = self.writes.lock().await;
        let taken = self
            .list_members()
            .await?
            .iter()
            .any(|m| m.matches_identity(&member.full_name, &member.date_of_birth));
        if taken {
            return Err(StorageError::Conflict(format!("identity of member {}", member.id)));
        }
        self.create_member(member).await
    }

    async fn award_points(&self, id: &MemberId, points: u64) -> Result<Member> {
        let path = self.member_path(id)?;

        let _guard = self.writes.lock().await;
        let mut member: Member = read_json(&path)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("member {id}")))?;
        member.points = member.points.saturating_add(points);
        write_json(&path, &member).await?;

        info!(member = %id, awarded = points, total = member.points, "points awarded");
        self.subscriptions.publish(&member);
        Ok(member)
    }

    async fn load_competition(&self, period: Period) -> Result<Option<Vec<CompetitionRecord>>> {
        let document: Option<serde_json::Map<String, serde_json::Value>> =
            read_json(&self.competition_path(period)).await?;
        Ok(document.map(|doc| records_from_document(&doc)))
    }

    async fn save_competition(&self, period: Period, records: &[CompetitionRecord]) -> Result<()> {
        let document = records_to_document(records);

        let _guard = self.writes.lock().await;
        write_json(&self.competition_path(period), &document).await?;
        info!(period = %period, records = document.len(), "competition sheet saved");
        Ok(())
    }

    async fn subscribe(&self, id: &MemberId) -> Result<MemberSubscription> {
        // Held until the channel is registered so no write can publish in
        // between and leave the seed stale.
        let _guard = self.writes.lock().await;
        let current = self.load_member(id).await?;
        Ok(self.subscriptions.subscribe(id, current))
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write through a temporary file so readers never see a torn document.
async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json.as_bytes()).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!(path = %entry.path().display(), error = %e, "skipping unreadable document"),
        }
    }
    Ok(items)
}
