//! Load-once behaviour of the table cache against temporary files.

use std::{fs, path::PathBuf, sync::Arc, thread};

use podium_core::dataset::Dataset;
use tempfile::TempDir;

use crate::FileDataset;

const MEDALS: &str = "\
discipline,noc,medal,year,event,as
Skiing (Alpine),NOR,Gold,2022,Downhill,Aleksander Kilde
Luge,GER,Silver,2018,Singles,Johannes Ludwig
";

const PREDICTIONS: &str = "\
sport,icon,athlete,desc,img,medals
Freestyle Skiing,⛷️,Gu Ailing,Defending champion,,3
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
  let path = dir.path().join(name);
  fs::write(&path, contents).expect("write fixture");
  path
}

fn dataset(dir: &TempDir) -> FileDataset {
  FileDataset::new(
    write(dir, "medals.csv", MEDALS),
    write(dir, "predictions.csv", PREDICTIONS),
  )
}

#[test]
fn tables_load_lazily_and_once() {
  let dir = tempfile::tempdir().unwrap();
  let ds = dataset(&dir);
  assert!(!ds.medals.is_loaded(ds.medals_path()));

  let first = ds.medals();
  assert_eq!(first.rows.len(), 2);
  assert!(first.error.is_none());
  assert!(ds.medals.is_loaded(ds.medals_path()));

  // Later changes to the file are not picked up.
  fs::write(ds.medals_path(), "year\n").unwrap();
  let second = ds.medals();
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(second.rows.len(), 2);
}

#[test]
fn concurrent_callers_share_one_load() {
  let dir = tempfile::tempdir().unwrap();
  let ds = dataset(&dir);

  let tables: Vec<_> = thread::scope(|scope| {
    let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| ds.predictions())).collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });
  assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
  assert_eq!(tables[0].rows[0].athlete, "Gu Ailing");
}

#[test]
fn missing_file_degrades_to_empty_table() {
  let dir = tempfile::tempdir().unwrap();
  let ds = FileDataset::new(
    dir.path().join("nope.csv"),
    write(&dir, "predictions.csv", PREDICTIONS),
  );

  let medals = ds.medals();
  assert!(medals.rows.is_empty());
  let message = medals.error.as_deref().unwrap();
  assert!(message.starts_with("Error loading medal data"));
  assert!(message.contains("nope.csv"));
  assert!(medals.digest.is_empty());

  // The other table is unaffected.
  assert_eq!(ds.predictions().rows.len(), 1);
}

#[test]
fn malformed_file_degrades_to_empty_table() {
  let dir = tempfile::tempdir().unwrap();
  let ds = FileDataset::new(
    write(&dir, "medals.csv", "noc,medal\nNOR,Gold\n"),
    write(&dir, "predictions.csv", "athlete,medals\nGu Ailing,lots\n"),
  );
  assert!(ds.medals().rows.is_empty());
  assert!(ds.medals().error.as_deref().unwrap().contains("year"));
  assert!(ds.predictions().rows.is_empty());
  assert!(ds.predictions().error.is_some());
}

#[test]
fn revision_tracks_content() {
  let dir = tempfile::tempdir().unwrap();
  let a = dataset(&dir);
  let b = dataset(&dir);
  assert_eq!(a.revision(), b.revision());
  assert_eq!(a.revision().len(), 16);

  let other = tempfile::tempdir().unwrap();
  let c = FileDataset::new(
    write(&other, "medals.csv", "year\n2022\n"),
    write(&other, "predictions.csv", PREDICTIONS),
  );
  assert_ne!(a.revision(), c.revision());
}

#[test]
fn preload_fills_both_caches() {
  let dir = tempfile::tempdir().unwrap();
  let ds = dataset(&dir);
  ds.preload();
  assert!(ds.medals.is_loaded(ds.medals_path()));
  assert!(ds.predictions.is_loaded(ds.predictions_path()));
}
