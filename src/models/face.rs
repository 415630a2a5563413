use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Face embedding vector as produced by the external embedding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding {
    pub values: Vec<f64>,
}

impl Embedding {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Euclidean distance. Both vectors must have the same length.
    pub fn euclidean_distance(&self, other: &Embedding) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

/// One registry entry (⇔ one object in `known_faces.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceEntry {
    pub name: String,
    pub encoding: Embedding,
}

/// Output of the embedding service for a single image: one embedding per
/// detected face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceScan {
    pub faces: Vec<Embedding>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScanFile {
    Bare(Vec<Embedding>),
    Wrapped { faces: Vec<Embedding> },
}

impl FaceScan {
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let parsed: ScanFile = serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidInput(format!("malformed face scan: {e}")))?;

        let faces = match parsed {
            ScanFile::Bare(f) | ScanFile::Wrapped { faces: f } => f,
        };

        if faces.iter().any(Embedding::is_empty) {
            return Err(AppError::InvalidInput(
                "face scan contains an empty embedding".into(),
            ));
        }

        Ok(Self { faces })
    }

    /// Read a scan from a file; `-` reads stdin.
    pub fn load(path: &str) -> AppResult<Self> {
        let raw = if path == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(Path::new(path))?
        };
        Self::from_json(&raw)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Exactly one face, as required for registration.
    pub fn single(&self) -> AppResult<&Embedding> {
        match self.faces.as_slice() {
            [] => Err(AppError::NoFaceDetected),
            [one] => Ok(one),
            many => Err(AppError::MultipleFaces(many.len())),
        }
    }

    /// First detected face, if any (attendance only looks at the first one).
    pub fn first(&self) -> Option<&Embedding> {
        self.faces.first()
    }
}
