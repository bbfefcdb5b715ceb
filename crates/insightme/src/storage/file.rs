use super::{validate_key, ResponseStore, StorageError, StoredResponseRef};
use crate::assessment::ResponseSet;
use chrono::{NaiveDateTime, TimeZone, Utc};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

const FILE_PREFIX: &str = "responses_";
const FILE_EXTENSION: &str = ".json";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One pretty-printed JSON file per saved set:
/// `responses_<user>_<assessment>_<YYYYmmdd_HHMMSS>.json`.
///
/// `_` and `%` inside a key are written as `%5F` and `%25`, so an underscore in the
/// name always separates segments and `("a_b", "c")` never collides with `("a", "b_c")`.
///
/// Two saves for the same user and assessment within one second share a file name;
/// the later save replaces the earlier one.
#[derive(Debug, Clone)]
pub struct FileResponseStore {
    root: PathBuf,
}

impl FileResponseStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn prefix(user_id: &str, assessment_name: &str) -> String {
        format!(
            "{FILE_PREFIX}{}_{}_",
            encode_segment(user_id),
            encode_segment(assessment_name)
        )
    }

    fn file_name(set: &ResponseSet) -> String {
        format!(
            "{}{}{FILE_EXTENSION}",
            Self::prefix(&set.user_id, &set.assessment_name),
            set.recorded_at.format(TIMESTAMP_FORMAT)
        )
    }

    fn matching_files(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<Vec<StoredResponseRef>, StorageError> {
        validate_key(user_id)?;
        validate_key(assessment_name)?;

        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let prefix = Self::prefix(user_id, assessment_name);
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(recorded_at) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(FILE_EXTENSION))
                .and_then(|stamp| NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok())
            else {
                continue;
            };

            found.push(StoredResponseRef {
                user_id: user_id.to_string(),
                assessment_name: assessment_name.to_string(),
                recorded_at: Utc.from_utc_datetime(&recorded_at),
                location: Some(entry.path()),
            });
        }

        found.sort_by(|a, b| a.location.cmp(&b.location));
        Ok(found)
    }
}

fn encode_segment(key: &str) -> String {
    key.replace('%', "%25").replace('_', "%5F")
}

impl ResponseStore for FileResponseStore {
    fn save(&self, set: &ResponseSet) -> Result<StoredResponseRef, StorageError> {
        validate_key(&set.user_id)?;
        validate_key(&set.assessment_name)?;

        fs::create_dir_all(&self.root)?;
        let path = self.root.join(Self::file_name(set));
        let payload = serde_json::to_vec_pretty(set)?;
        fs::write(&path, payload)?;

        debug!(
            path = %path.display(),
            responses = set.responses.len(),
            "saved response set"
        );

        Ok(StoredResponseRef {
            user_id: set.user_id.clone(),
            assessment_name: set.assessment_name.clone(),
            recorded_at: set.recorded_at,
            location: Some(path),
        })
    }

    fn load_latest(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<Option<ResponseSet>, StorageError> {
        let Some(latest) = self.matching_files(user_id, assessment_name)?.pop() else {
            return Ok(None);
        };
        let Some(path) = latest.location else {
            return Ok(None);
        };

        let file = fs::File::open(&path)?;
        let set = serde_json::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "loaded latest response set");
        Ok(Some(set))
    }

    fn list(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<Vec<StoredResponseRef>, StorageError> {
        self.matching_files(user_id, assessment_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Response;

    fn set_at(user: &str, assessment: &str, hour: u32, answer: i64) -> ResponseSet {
        ResponseSet::new(
            user,
            assessment,
            Utc.with_ymd_and_hms(2025, 3, 14, hour, 30, 0)
                .single()
                .expect("valid timestamp"),
            vec![Response::new("CV01", answer)],
        )
    }

    #[test]
    fn save_writes_named_json_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileResponseStore::new(dir.path().join("nested"));

        let stored = store
            .save(&set_at("u1", "full", 9, 4))
            .expect("save succeeds");

        let location = stored.location.expect("file path recorded");
        assert_eq!(
            location.file_name().and_then(|name| name.to_str()),
            Some("responses_u1_full_20250314_093000.json")
        );
        let text = fs::read_to_string(location).expect("file readable");
        assert!(text.contains("\n  \"user_id\": \"u1\""));
    }

    #[test]
    fn load_latest_picks_newest_and_ignores_lookalike_names() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileResponseStore::new(dir.path());

        store.save(&set_at("u1", "full", 8, 1)).expect("save");
        store.save(&set_at("u1", "full", 10, 3)).expect("save");
        store.save(&set_at("u1", "full_v2", 11, 5)).expect("save");
        store.save(&set_at("u10", "full", 12, 5)).expect("save");

        let latest = store
            .load_latest("u1", "full")
            .expect("load succeeds")
            .expect("a set exists");
        assert_eq!(latest.responses, vec![Response::new("CV01", 3)]);

        let listed = store.list("u1", "full").expect("list succeeds");
        assert_eq!(listed.len(), 2);
        assert!(listed[0].recorded_at < listed[1].recorded_at);
    }

    #[test]
    fn underscores_in_keys_do_not_cross_users() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileResponseStore::new(dir.path());

        let stored = store.save(&set_at("a", "b_c", 9, 2)).expect("save");
        assert_eq!(
            stored
                .location
                .as_deref()
                .and_then(Path::file_name)
                .and_then(|name| name.to_str()),
            Some("responses_a_b%5Fc_20250314_093000.json")
        );

        assert!(store.load_latest("a_b", "c").expect("load").is_none());
        assert!(store.list("a_b", "c").expect("list").is_empty());

        store.save(&set_at("a_b", "c", 10, 4)).expect("save");
        let own = store
            .load_latest("a_b", "c")
            .expect("load")
            .expect("a set exists");
        assert_eq!(own.user_id, "a_b");
        assert_eq!(own.assessment_name, "c");

        let other = store
            .load_latest("a", "b_c")
            .expect("load")
            .expect("a set exists");
        assert_eq!(other.responses, vec![Response::new("CV01", 2)]);
    }

    #[test]
    fn percent_signs_stay_distinct_from_escaped_underscores() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileResponseStore::new(dir.path());

        store.save(&set_at("x%5Fy", "full", 9, 1)).expect("save");

        assert!(store.load_latest("x_y", "full").expect("load").is_none());
        assert_eq!(store.list("x%5Fy", "full").expect("list").len(), 1);
    }

    #[test]
    fn missing_directory_means_nothing_stored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileResponseStore::new(dir.path().join("absent"));

        assert!(store.load_latest("u1", "full").expect("load").is_none());
        assert!(store.list("u1", "full").expect("list").is_empty());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileResponseStore::new(dir.path());

        let err = store
            .save(&set_at("../escape", "full", 9, 4))
            .expect_err("invalid user rejected");
        assert!(matches!(err, StorageError::InvalidKey { .. }));
        assert!(matches!(
            store.load_latest("u1", "a/b"),
            Err(StorageError::InvalidKey { .. })
        ));
    }

    #[test]
    fn corrupt_file_surfaces_json_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileResponseStore::new(dir.path());
        fs::write(
            dir.path().join("responses_u1_full_20250314_093000.json"),
            "{not json",
        )
        .expect("write corrupt file");

        assert!(matches!(
            store.load_latest("u1", "full"),
            Err(StorageError::Json(_))
        ));
    }
}
