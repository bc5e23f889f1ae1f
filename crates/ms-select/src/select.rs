//! Best-run selection and checkpoint resolution.

use std::path::{Path, PathBuf};
use tracing::info;

use ms_types::{checkpoint_name_for_log, LogError, LogScore, ObjectiveDirection};

/// The winning run: its log, score, and (resolved) checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct BestRun {
    pub log: LogScore,
    pub checkpoint_path: PathBuf,
}

/// Pick the best score under `direction`. Ties keep the earlier entry, so
/// with a sorted scan the winner is deterministic.
pub fn select_best(
    scores: &[LogScore],
    direction: ObjectiveDirection,
) -> Result<&LogScore, LogError> {
    let mut best: Option<&LogScore> = None;
    for candidate in scores {
        match best {
            None => best = Some(candidate),
            Some(incumbent) if direction.is_improvement(candidate.score, incumbent.score) => {
                best = Some(candidate)
            }
            Some(_) => {}
        }
    }
    best.ok_or_else(|| LogError::NoResults {
        directory: PathBuf::new(),
    })
}

/// Derive and verify the checkpoint for a selected log.
///
/// The checkpoint file name comes from the log file name by substitution
/// (`<stem>.txt` → `<stem>_model.pt`) and is looked up under
/// `checkpoint_dir`. A log whose name does not follow the scheme, or whose
/// checkpoint is absent, is a reported error — never a malformed path
/// handed to the prediction subprocess.
pub fn resolve_checkpoint(best: &LogScore, checkpoint_dir: &Path) -> Result<PathBuf, LogError> {
    let log_name = best
        .source_file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LogError::Unreadable {
            path: best.source_file.clone(),
            message: "log path has no file name".to_string(),
        })?;

    let checkpoint_name =
        checkpoint_name_for_log(log_name).ok_or_else(|| LogError::Unreadable {
            path: best.source_file.clone(),
            message: format!("log name {log_name:?} does not follow the run-naming scheme"),
        })?;

    let checkpoint_path = checkpoint_dir.join(checkpoint_name);
    if !checkpoint_path.is_file() {
        return Err(LogError::CheckpointMissing {
            path: checkpoint_path,
        });
    }

    info!(
        log = %best.source_file.display(),
        score = best.score,
        checkpoint = %checkpoint_path.display(),
        "selected best run"
    );
    Ok(checkpoint_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn score(name: &str, value: f64) -> LogScore {
        LogScore {
            source_file: PathBuf::from(name),
            score: value,
        }
    }

    #[test]
    fn minimize_picks_the_lowest() {
        let scores = vec![score("a.txt", 0.55), score("b.txt", 0.40)];
        let best = select_best(&scores, ObjectiveDirection::Minimize).unwrap();
        assert_eq!(best.score, 0.40);
        assert_eq!(best.source_file, PathBuf::from("b.txt"));
    }

    #[test]
    fn maximize_picks_the_highest() {
        let scores = vec![score("a.txt", 0.55), score("b.txt", 0.40)];
        let best = select_best(&scores, ObjectiveDirection::Maximize).unwrap();
        assert_eq!(best.source_file, PathBuf::from("a.txt"));
    }

    #[test]
    fn ties_keep_the_first_entry() {
        let scores = vec![score("a.txt", 0.5), score("b.txt", 0.5)];
        let best = select_best(&scores, ObjectiveDirection::Minimize).unwrap();
        assert_eq!(best.source_file, PathBuf::from("a.txt"));
    }

    #[test]
    fn empty_input_is_no_results() {
        assert!(matches!(
            select_best(&[], ObjectiveDirection::Minimize),
            Err(LogError::NoResults { .. })
        ));
    }

    #[test]
    fn resolves_existing_checkpoint() {
        let dir = TempDir::new().unwrap();
        let model_dir = dir.path().join("model");
        std::fs::create_dir(&model_dir).unwrap();
        File::create(model_dir.join("64_9_2_2_0_model.pt")).unwrap();

        let best = score("64_9_2_2_0.txt", 0.4);
        let checkpoint = resolve_checkpoint(&best, &model_dir).unwrap();
        assert_eq!(checkpoint, model_dir.join("64_9_2_2_0_model.pt"));
    }

    #[test]
    fn missing_checkpoint_is_reported() {
        let dir = TempDir::new().unwrap();
        let best = score("64_9_2_2_0.txt", 0.4);
        assert!(matches!(
            resolve_checkpoint(&best, dir.path()),
            Err(LogError::CheckpointMissing { .. })
        ));
    }

    #[test]
    fn off_scheme_log_name_is_reported() {
        let dir = TempDir::new().unwrap();
        let best = score("summary.log", 0.4);
        assert!(matches!(
            resolve_checkpoint(&best, dir.path()),
            Err(LogError::Unreadable { .. })
        ));
    }
}
