//! Identity registry: person name → face embedding.

use crate::db::store::Collection;
use crate::errors::{AppError, AppResult};
use crate::models::face::{Embedding, FaceEntry};

/// Default maximum distance for a positive match.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Result of matching a query embedding against the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matched: bool,
    /// Distance of the closest entry.
    pub distance: f64,
    /// Name of the closest entry when `matched`.
    pub name: Option<String>,
}

/// Strategy for comparing a query embedding against the registry entries.
pub trait Matcher {
    fn compare(&self, query: &Embedding, gallery: &[FaceEntry], tolerance: f64) -> MatchResult;
}

/// Nearest neighbour by Euclidean distance.
/// On equal distances the first entry in storage order wins.
pub struct EuclideanMatcher;

impl Matcher for EuclideanMatcher {
    fn compare(&self, query: &Embedding, gallery: &[FaceEntry], tolerance: f64) -> MatchResult {
        let mut best: Option<(usize, f64)> = None;

        for (i, entry) in gallery.iter().enumerate() {
            let d = query.euclidean_distance(&entry.encoding);
            // strict `<` keeps the first minimum
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }

        match best {
            Some((idx, d)) if d <= tolerance => MatchResult {
                matched: true,
                distance: d,
                name: Some(gallery[idx].name.clone()),
            },
            Some((_, d)) => MatchResult {
                matched: false,
                distance: d,
                name: None,
            },
            None => MatchResult {
                matched: false,
                distance: f64::INFINITY,
                name: None,
            },
        }
    }
}

pub struct IdentityRegistry<'a> {
    faces: &'a Collection<FaceEntry>,
    matcher: Box<dyn Matcher>,
}

impl<'a> IdentityRegistry<'a> {
    pub fn new(faces: &'a Collection<FaceEntry>) -> Self {
        Self::with_matcher(faces, Box::new(EuclideanMatcher))
    }

    pub fn with_matcher(faces: &'a Collection<FaceEntry>, matcher: Box<dyn Matcher>) -> Self {
        Self { faces, matcher }
    }

    /// Fails when `embedding` could not be stored under `name`: empty, or a
    /// length different from the other entries.
    pub fn check_embedding(&self, name: &str, embedding: &Embedding) -> AppResult<()> {
        check_against(&self.faces.load()?, name, embedding)
    }

    /// Insert or replace the entry for `name` (remove-then-insert).
    pub fn register(&self, name: &str, embedding: Embedding) -> AppResult<()> {
        self.faces.update(|entries| {
            check_against(entries, name, &embedding)?;
            entries.retain(|e| e.name != name);

            entries.push(FaceEntry {
                name: name.to_string(),
                encoding: embedding,
            });
            Ok(())
        })?;

        tracing::info!(name, "face registered");
        Ok(())
    }

    /// Closest entry within `tolerance`; fails with `EmptyRegistry` when
    /// nothing is registered.
    pub fn match_face(&self, query: &Embedding, tolerance: f64) -> AppResult<MatchResult> {
        let entries = self.faces.load()?;

        let Some(first) = entries.first() else {
            return Err(AppError::EmptyRegistry);
        };

        if first.encoding.len() != query.len() {
            return Err(AppError::InvalidInput(format!(
                "query embedding length {} does not match registry length {}",
                query.len(),
                first.encoding.len()
            )));
        }

        let result = self.matcher.compare(query, &entries, tolerance);
        tracing::debug!(
            matched = result.matched,
            distance = result.distance,
            name = result.name.as_deref().unwrap_or("Unknown"),
            "face match"
        );
        Ok(result)
    }

    /// Delete the entry if present. Returns whether something was removed.
    pub fn remove(&self, name: &str) -> AppResult<bool> {
        self.faces.update_when(|entries| {
            let before = entries.len();
            entries.retain(|e| e.name != name);
            let removed = entries.len() != before;
            Ok((removed, removed))
        })
    }

    pub fn contains(&self, name: &str) -> AppResult<bool> {
        Ok(self.faces.load()?.iter().any(|e| e.name == name))
    }

    pub fn names(&self) -> AppResult<Vec<String>> {
        Ok(self.faces.load()?.into_iter().map(|e| e.name).collect())
    }
}

fn check_against(entries: &[FaceEntry], name: &str, embedding: &Embedding) -> AppResult<()> {
    if embedding.is_empty() {
        return Err(AppError::InvalidInput("empty embedding".into()));
    }

    if let Some(other) = entries.iter().find(|e| e.name != name)
        && other.encoding.len() != embedding.len()
    {
        return Err(AppError::InvalidInput(format!(
            "embedding length {} does not match registry length {}",
            embedding.len(),
            other.encoding.len()
        )));
    }
    Ok(())
}
