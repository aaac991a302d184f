use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;

use futures::future::join_all;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Delete,
    Archive,
}

impl FromStr for BulkAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delete" => Ok(BulkAction::Delete),
            "archive" => Ok(BulkAction::Archive),
            other => Err(format!("unknown bulk action: {other}")),
        }
    }
}

/// Per-item result of a bulk call.
#[derive(Debug, Default, PartialEq)]
pub struct BulkOutcome {
    pub succeeded: Vec<i64>,
    pub failed: Vec<(i64, String)>,
}

impl BulkOutcome {
    /// Flash text: how many went through, and which ids did not.
    pub fn summary(&self, verb: &str) -> String {
        if self.failed.is_empty() {
            return format!("{} kayıt {verb}.", self.succeeded.len());
        }
        let failed = self
            .failed
            .iter()
            .map(|(id, msg)| format!("#{id} ({msg})"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} kayıt {verb}. Başarısız: {failed}", self.succeeded.len())
    }
}

/// Ids of ticked `sel_{id}` checkboxes, ascending.
pub fn selected_ids(form: &HashMap<String, String>) -> Vec<i64> {
    let mut ids: Vec<i64> = form
        .keys()
        .filter_map(|k| k.strip_prefix("sel_"))
        .filter_map(|id| id.parse().ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Run `op` for every id concurrently and wait for all of them. A 401 on
/// any item aborts the whole action so the session can be purged.
pub async fn run<F, Fut>(ids: &[i64], op: F) -> Result<BulkOutcome, ApiError>
where
    F: Fn(i64) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let op = &op;
    let results = join_all(ids.iter().map(|&id| async move { (id, op(id).await) })).await;

    let mut outcome = BulkOutcome::default();
    for (id, result) in results {
        match result {
            Ok(()) => outcome.succeeded.push(id),
            Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
            Err(e) => {
                log::warn!("[bulk] item {id} failed: {e}");
                outcome.failed.push((id, e.user_message()));
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_failure_does_not_hide_the_others() {
        let outcome = run(&[1, 2, 3], |id| async move {
            if id == 2 {
                Err(ApiError::Status { status: 500, message: "boom".into() })
            } else {
                Ok(())
            }
        })
        .await
        .unwrap();
        assert_eq!(outcome.succeeded, vec![1, 3]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, 2);
        assert!(outcome.summary("silindi").contains("#2"));
    }

    #[tokio::test]
    async fn unauthorized_aborts() {
        let result = run(&[1, 2], |id| async move {
            if id == 1 { Err(ApiError::Unauthorized) } else { Ok(()) }
        })
        .await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn selected_ids_parse_checkbox_keys() {
        let form: HashMap<String, String> = [("sel_4", "on"), ("sel_2", "on"), ("sel_x", "on"), ("csrf_token", "t")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(selected_ids(&form), vec![2, 4]);
        assert_eq!("archive".parse(), Ok(BulkAction::Archive));
    }
}
