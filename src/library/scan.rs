use std::path::Path;

use lofty::prelude::{AudioFile, ItemKey, TaggedFileExt};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Identifier for `path`: relative to `root` with `/` separators, or the
/// file name when `path` is not under `root`.
fn track_id(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        _ => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Fill in `title` and `duration` from the file's tags.
///
/// Scanning leaves tags alone so a rescan stays a directory walk; callers
/// load them for the one track they care about.
pub fn load_tags(track: &mut Track) {
    let Ok(tagged) = lofty::read_from_path(&track.path) else {
        debug!(track = %track.id, "no readable tags");
        return;
    };

    let duration = tagged.properties().duration();
    if !duration.is_zero() {
        track.duration = Some(duration);
    }

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
            if !v.trim().is_empty() {
                track.title = v.trim().to_string();
            }
        }
    }
}

/// Walk `dir` and collect every audio file allowed by `settings`.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let id = track_id(dir, path);
            tracks.push(Track {
                title: id.clone(),
                id,
                path: path.to_path_buf(),
                duration: None,
            });
        }
    }

    tracks.sort_by(|a, b| a.id.cmp(&b.id));
    debug!(dir = %dir.display(), count = tracks.len(), "scanned music directory");
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings_with(exts: &[&str]) -> LibrarySettings {
        LibrarySettings {
            extensions: exts.iter().map(|e| e.to_string()).collect(),
            ..LibrarySettings::default()
        }
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = settings_with(&["mp3", ".ogg"]);
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn track_id_is_relative_with_forward_slashes() {
        let root = Path::new("/music");
        assert_eq!(track_id(root, Path::new("/music/a.mp3")), "a.mp3");
        assert_eq!(track_id(root, Path::new("/music/sub/b.mp3")), "sub/b.mp3");
        assert_eq!(track_id(root, Path::new("/elsewhere/c.mp3")), "c.mp3");
    }

    #[test]
    fn scan_filters_non_audio_and_sorts_by_id() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.mp3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default());
        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a.mp3", "b.MP3"]);
        assert_eq!(tracks[0].duration, None);
    }

    #[test]
    fn scan_skips_hidden_files_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "visible.mp3");

        let settings = LibrarySettings {
            include_hidden: true,
            ..LibrarySettings::default()
        };
        assert_eq!(scan(dir.path(), &settings).len(), 2);
    }

    #[test]
    fn scan_stays_in_root_unless_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "root.mp3");

        let settings = LibrarySettings {
            recursive: true,
            ..LibrarySettings::default()
        };
        let ids: Vec<String> = scan(dir.path(), &settings)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["root.mp3".to_string(), "sub/child.mp3".to_string()]);
    }

    #[test]
    fn scan_respects_max_depth() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = d1.join("d2");
        fs::create_dir_all(&d2).unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        fs::write(d1.join("one.mp3"), b"not real").unwrap();
        fs::write(d2.join("two.mp3"), b"not real").unwrap();

        // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
        let settings = LibrarySettings {
            recursive: true,
            max_depth: Some(2),
            ..LibrarySettings::default()
        };
        let ids: Vec<String> = scan(dir.path(), &settings)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert!(ids.contains(&"root.mp3".to_string()));
        assert!(ids.contains(&"d1/one.mp3".to_string()));
        assert!(!ids.contains(&"d1/d2/two.mp3".to_string()));
    }
}
