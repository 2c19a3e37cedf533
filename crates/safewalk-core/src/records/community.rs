//! Community submission repository.

use chrono::Utc;

use super::{Record, RecordStore};
use crate::{
  Result,
  alert::UserSnapshot,
  community::{CommunityFilter, CommunitySubmission, NewCommunitySubmission},
  flow::FlowError,
  store::{Key, KeyValueStore},
};

impl Record for CommunitySubmission {
  fn id(&self) -> i64 { self.id }
}

pub struct Community<'a, S> {
  pub(super) records: &'a RecordStore<S>,
}

impl<S: KeyValueStore> Community<'_, S> {
  pub async fn list(&self, filter: CommunityFilter) -> Result<Vec<CommunitySubmission>> {
    let all = self.records.load(Key::CommunitySubmissions).await?;
    Ok(filter.apply(all))
  }

  pub async fn append(
    &self,
    user: UserSnapshot,
    input: NewCommunitySubmission,
  ) -> Result<CommunitySubmission> {
    let content = input.content.trim().to_owned();
    if content.is_empty() {
      return Err(FlowError::EmptyContent.into());
    }
    let _guard = self.records.lock().await;
    self
      .records
      .append_locked(Key::CommunitySubmissions, |id| CommunitySubmission {
        id,
        kind: input.kind,
        content,
        user,
        created_at: Utc::now(),
      })
      .await
  }
}
