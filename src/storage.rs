use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::format::{
    decode_lines, decode_tasks, encode_archive_block, encode_tasks, parse_properties,
    render_properties, TIMESTAMP_FORMAT,
};
use crate::models::{Settings, Task};
use crate::settings::{settings_from_properties, settings_to_properties, SETTINGS_COMMENT};

const TASKS_FILE: &str = "tasks.txt";
const ARCHIVE_FILE: &str = "massdelete.txt";
const SETTINGS_FILE: &str = "settings.properties";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::Io { source, .. } => source.kind() == ErrorKind::NotFound,
        }
    }
}

/// File names inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub tasks_file: String,
    pub archive_file: String,
    pub settings_file: String,
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self {
            tasks_file: TASKS_FILE.to_string(),
            archive_file: ARCHIVE_FILE.to_string(),
            settings_file: SETTINGS_FILE.to_string(),
        }
    }
}

/// Everything the commands read from or write to disk.
pub trait Persistence {
    fn load_tasks(&self) -> Result<Vec<Task>, StorageError>;
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError>;
    /// Appends one session block. Never truncates.
    fn archive_tasks(&self, tasks: &[Task]) -> Result<(), StorageError>;
    fn tasks_exist(&self) -> bool;
    fn load_settings(&self) -> Result<Settings, StorageError>;
    fn save_settings(&self, settings: &Settings) -> Result<(), StorageError>;
}

pub struct Storage {
    root: PathBuf,
    layout: StorageLayout,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self::with_layout(root, StorageLayout::default())
    }

    pub fn with_layout(root: PathBuf, layout: StorageLayout) -> Self {
        Self { root, layout }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.root.join(&self.layout.tasks_file)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(&self.layout.archive_file)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(&self.layout.settings_file)
    }

    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|err| StorageError::io(&self.root, err))
    }

    /// `None` when the file does not exist. Undecodable lines come back blank so a
    /// single bad byte costs one row, not the whole file.
    fn read_optional(&self, path: &Path) -> Result<Option<String>, StorageError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(decode_lines(&bytes))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(path, err)),
        }
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        let temp_path = path.with_extension("tmp");
        {
            let mut file =
                File::create(&temp_path).map_err(|e| StorageError::io(&temp_path, e))?;
            file.write_all(content.as_bytes())
                .and_then(|_| file.sync_all())
                .map_err(|e| StorageError::io(&temp_path, e))?;
        }
        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::io(path, e)
        })
    }
}

impl Persistence for Storage {
    fn load_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let path = self.tasks_path();
        let tasks = match self.read_optional(&path)? {
            Some(content) => decode_tasks(&content),
            None => {
                log::info!("no task file at {}, starting empty", path.display());
                Vec::new()
            }
        };
        Ok(tasks)
    }

    fn tasks_exist(&self) -> bool {
        self.tasks_path().exists()
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let path = self.tasks_path();
        self.write_atomic(&path, &encode_tasks(tasks))?;
        log::info!("saved tasks count={} path={}", tasks.len(), path.display());
        Ok(())
    }

    fn archive_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let path = self.archive_path();
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let block = encode_archive_block(tasks, &timestamp);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::io(&path, e))?;
        file.write_all(block.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| StorageError::io(&path, e))?;
        log::info!("archived tasks count={} path={}", tasks.len(), path.display());
        Ok(())
    }

    fn load_settings(&self) -> Result<Settings, StorageError> {
        let path = self.settings_path();
        let settings = match self.read_optional(&path)? {
            Some(content) => settings_from_properties(&parse_properties(&content)),
            None => Settings::default(),
        };
        Ok(settings)
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        let path = self.settings_path();
        let comments = [
            SETTINGS_COMMENT.to_string(),
            chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        ];
        let content = render_properties(&comments, &settings_to_properties(settings));
        self.write_atomic(&path, &content)?;
        log::info!("saved settings path={}", path.display());
        Ok(())
    }
}
