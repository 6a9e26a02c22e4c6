use crate::application::SubmittedApplication;
use crate::domain::{ApplicationDraft, Summary};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid draft file {}: {source}", .path.display())]
    InvalidDraft {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl PersistenceError {
    fn io(path: &Path, source: io::Error) -> Self {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub struct FileRepository;

impl FileRepository {
    /// Writes the submitted draft as pretty-printed JSON using the form's
    /// field names.
    pub fn save_application(
        application: &SubmittedApplication,
        path: &Path,
    ) -> Result<PathBuf, PersistenceError> {
        ensure_parent(path)?;
        let json = serde_json::to_string_pretty(application.draft())?;
        fs::write(path, json).map_err(|e| PersistenceError::io(path, e))?;
        tracing::info!(path = %path.display(), "application saved");
        Ok(path.to_path_buf())
    }

    /// Reads a draft to pre-fill the form. Missing keys stay empty.
    pub fn load_draft(path: &Path) -> Result<ApplicationDraft, PersistenceError> {
        let content = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| PersistenceError::InvalidDraft {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub struct SummaryExporter;

impl SummaryExporter {
    /// Writes the summary as a two-column `field,value` CSV.
    pub fn export_csv(summary: &Summary, path: &Path) -> Result<PathBuf, PersistenceError> {
        ensure_parent(path)?;
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["field", "value"])?;
        for line in &summary.lines {
            writer.write_record([line.label, line.value.as_str()])?;
        }
        writer.flush().map_err(|e| PersistenceError::io(path, e))?;
        tracing::info!(path = %path.display(), rows = summary.lines.len(), "summary exported");
        Ok(path.to_path_buf())
    }
}

fn ensure_parent(path: &Path) -> Result<(), PersistenceError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::FormPhase;
    use crate::domain::Position;
    use tempfile::tempdir;

    fn submitted() -> SubmittedApplication {
        let draft = ApplicationDraft {
            full_name: "Linus".to_string(),
            email: "linus@kernel.org".to_string(),
            phone_number: "5551234567".to_string(),
            position: Some(Position::Developer),
            relevant_experience: "30".to_string(),
            additional_skills: vec!["Python".to_string()],
            interview_time: "2024-07-04T15:00".to_string(),
            ..ApplicationDraft::default()
        };
        let mut phase = FormPhase::new(draft);
        phase.submit();
        match phase {
            FormPhase::Submitted(application) => application,
            FormPhase::Editing { errors, .. } => panic!("draft should be valid: {errors:?}"),
        }
    }

    #[test]
    fn test_save_and_load_application() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("application.json");
        let application = submitted();

        let saved = FileRepository::save_application(&application, &path).unwrap();
        assert_eq!(saved, path);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"fullName\": \"Linus\""));
        assert!(content.contains("\"position\": \"Developer\""));

        let loaded = FileRepository::load_draft(&path).unwrap();
        assert_eq!(&loaded, application.draft());
    }

    #[test]
    fn test_load_draft_missing_file() {
        let dir = tempdir().unwrap();
        let result = FileRepository::load_draft(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }

    #[test]
    fn test_load_draft_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let result = FileRepository::load_draft(&path);
        assert!(matches!(result, Err(PersistenceError::InvalidDraft { .. })));
    }

    #[test]
    fn test_load_draft_with_unset_position_and_repeated_skills() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(
            &path,
            r#"{"fullName":"A","position":"","additionalSkills":["CSS","CSS","Rust"]}"#,
        )
        .unwrap();

        let mut draft = FileRepository::load_draft(&path).unwrap();
        assert_eq!(draft.full_name, "A");
        assert_eq!(draft.position, None);
        assert_eq!(draft.additional_skills, vec!["CSS", "Rust"]);

        let before = draft.additional_skills.clone();
        draft.toggle_skill("CSS", false);
        draft.toggle_skill("CSS", true);
        draft.toggle_skill("JavaScript", true);
        draft.toggle_skill("JavaScript", false);
        assert_eq!(draft.additional_skills, vec!["Rust", "CSS"]);
        assert_eq!(draft.additional_skills.len(), before.len());
    }

    #[test]
    fn test_load_draft_rejects_unknown_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, r#"{"position":"Intern"}"#).unwrap();
        let result = FileRepository::load_draft(&path);
        assert!(matches!(result, Err(PersistenceError::InvalidDraft { .. })));
    }

    #[test]
    fn test_export_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("application.csv");
        let application = submitted();

        SummaryExporter::export_csv(application.summary(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<(String, String)> = reader
            .records()
            .map(|record| {
                let record = record.unwrap();
                (record[0].to_string(), record[1].to_string())
            })
            .collect();
        assert_eq!(rows[0], ("Full Name".to_string(), "Linus".to_string()));
        assert!(rows.contains(&("Relevant Experience".to_string(), "30 years".to_string())));
        assert_eq!(rows.len(), application.summary().lines.len());
    }
}
