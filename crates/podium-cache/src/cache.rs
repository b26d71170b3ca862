//! [`TableCache`]: one decoded table per source path.

use std::{
  collections::HashMap,
  fmt,
  path::{Path, PathBuf},
  sync::{Arc, Mutex, OnceLock, PoisonError},
};

use podium_core::dataset::Loaded;
use sha2::{Digest, Sha256};

/// Decodes the raw bytes of one source file.
pub type Parser<T> = fn(&[u8]) -> podium_csv::Result<Vec<T>>;

type Slot<T> = Arc<OnceLock<Arc<Loaded<T>>>>;

/// Caches decoded tables by source path.
///
/// The path map is only locked long enough to find or insert the slot for a
/// path; the load itself runs outside that lock, inside the slot's
/// [`OnceLock`], so concurrent callers for the same path wait for a single
/// load while other paths proceed independently.
pub struct TableCache<T> {
  kind:    &'static str,
  parse:   Parser<T>,
  entries: Mutex<HashMap<PathBuf, Slot<T>>>,
}

impl<T> TableCache<T> {
  /// `kind` names the table in logs and error messages.
  pub fn new(kind: &'static str, parse: Parser<T>) -> Self {
    Self {
      kind,
      parse,
      entries: Mutex::new(HashMap::new()),
    }
  }

  /// The table for `path`, loading it on first use.
  pub fn load(&self, path: &Path) -> Arc<Loaded<T>> {
    let slot = {
      let mut entries =
        self.entries.lock().unwrap_or_else(PoisonError::into_inner);
      Arc::clone(entries.entry(path.to_path_buf()).or_default())
    };
    Arc::clone(slot.get_or_init(|| Arc::new(self.read(path))))
  }

  /// Whether `path` has finished loading.
  pub fn is_loaded(&self, path: &Path) -> bool {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .get(path)
      .is_some_and(|slot| slot.get().is_some())
  }

  fn read(&self, path: &Path) -> Loaded<T> {
    let result = podium_csv::read_source(path).and_then(|bytes| {
      let digest = hex::encode(Sha256::digest(&bytes));
      (self.parse)(&bytes[..]).map(|rows| Loaded::ok(rows, digest))
    });

    match result {
      Ok(loaded) => {
        tracing::info!(
          path = %path.display(),
          rows = loaded.rows.len(),
          "loaded {} table",
          self.kind
        );
        loaded
      }
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "failed to load {} table", self.kind);
        Loaded::failed(format!("Error loading {} data: {e}", self.kind))
      }
    }
  }
}

impl<T> fmt::Debug for TableCache<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TableCache").field("kind", &self.kind).finish()
  }
}
