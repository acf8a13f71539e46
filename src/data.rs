// src/data.rs

use std::fmt;

use crate::model::{CodingStandard, Lesson, RoadmapWeek};

/// Contenido de referencia embebido en el binario. Nunca se modifica.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub lessons: Vec<Lesson>,
    pub roadmap: Vec<RoadmapWeek>,
    pub standards: Vec<CodingStandard>,
}

#[derive(Debug)]
pub enum DataError {
    Yaml { file: &'static str, source: serde_yaml::Error },
    Invalid { file: &'static str, reason: String },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Yaml { file, source } => write!(f, "{file}: YAML inválido: {source}"),
            DataError::Invalid { file, reason } => write!(f, "{file}: {reason}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Yaml { source, .. } => Some(source),
            DataError::Invalid { .. } => None,
        }
    }
}

const CURRICULUM_YAML: &str = include_str!("data/curriculum.yaml");
const ROADMAP_YAML: &str = include_str!("data/roadmap.yaml");
const STANDARDS_YAML: &str = include_str!("data/standards.yaml");

/// Carga currículo, hoja de ruta y normas de codificación desde el YAML embebido
pub fn load_content() -> Result<Content, DataError> {
    let lessons: Vec<Lesson> = parse("curriculum.yaml", CURRICULUM_YAML)?;
    let roadmap: Vec<RoadmapWeek> = parse("roadmap.yaml", ROADMAP_YAML)?;
    let standards: Vec<CodingStandard> = parse("standards.yaml", STANDARDS_YAML)?;

    if lessons.is_empty() {
        return Err(DataError::Invalid {
            file: "curriculum.yaml",
            reason: "el currículo no tiene lecciones".into(),
        });
    }
    for lesson in &lessons {
        check_scale("curriculum.yaml", &lesson.id, "difficulty", lesson.difficulty)?;
        check_scale("curriculum.yaml", &lesson.id, "frequency", lesson.frequency)?;
    }

    log::info!(
        "contenido cargado: {} lecciones, {} semanas, {} normas",
        lessons.len(),
        roadmap.len(),
        standards.len()
    );

    Ok(Content {
        lessons,
        roadmap,
        standards,
    })
}

fn parse<T: serde::de::DeserializeOwned>(file: &'static str, text: &str) -> Result<T, DataError> {
    serde_yaml::from_str(text).map_err(|source| DataError::Yaml { file, source })
}

fn check_scale(file: &'static str, id: &str, field: &str, value: u8) -> Result<(), DataError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(DataError::Invalid {
            file,
            reason: format!("{id}: {field} = {value} fuera de 1..=5"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_loads() {
        let content = load_content().expect("contenido embebido válido");
        assert_eq!(content.lessons.len(), 20);
        assert_eq!(content.roadmap.len(), 10);
        assert_eq!(content.standards.len(), 7);
        assert_eq!(content.lessons[0].id, "week1-1");
        assert!(content.lessons[0].content.starts_with("# 1."));
    }

    #[test]
    fn lesson_ids_are_unique() {
        let content = load_content().unwrap();
        let mut ids: Vec<&str> = content.lessons.iter().map(|l| l.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), content.lessons.len());
    }

    #[test]
    fn out_of_range_scale_is_rejected() {
        let err = check_scale("x.yaml", "l1", "difficulty", 6).unwrap_err();
        assert!(err.to_string().contains("fuera de 1..=5"));
    }
}
