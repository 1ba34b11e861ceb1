//! Static catalog of school subjects used to resolve `#tag` references.

use crate::models::{Subject, SubjectId};

/// Ordered, immutable mapping from [`SubjectId`] to [`Subject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

impl SubjectCatalog {
    /// Builds a catalog. Later entries reusing an id are dropped.
    pub fn new(subjects: impl IntoIterator<Item = Subject>) -> Self {
        let mut unique: Vec<Subject> = Vec::new();
        for subject in subjects {
            if unique.iter().any(|s| s.id == subject.id) {
                log::debug!("Ignoring duplicate subject id '{}'", subject.id);
                continue;
            }
            unique.push(subject);
        }
        Self { subjects: unique }
    }

    /// The subjects shipped with StudyDesk.
    pub fn builtin() -> Self {
        Self::new([
            Subject::new("math", "Mathematics", "#3B82F6", "∑"),
            Subject::new("physics", "Physics", "#8B5CF6", "⚛"),
            Subject::new("chemistry", "Chemistry", "#10B981", "⚗"),
            Subject::new("biology", "Biology", "#22C55E", "🧬"),
            Subject::new("history", "History", "#F59E0B", "🏛"),
            Subject::new("literature", "Literature", "#EF4444", "📖"),
            Subject::new("english", "English", "#EC4899", "🗣"),
            Subject::new("informatics", "Informatics", "#06B6D4", "💻"),
        ])
    }

    pub fn get(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    /// Resolves a `#tag` (without the hash) by id or by display name,
    /// ignoring case.
    pub fn resolve(&self, tag: &str) -> Option<&Subject> {
        let tag = tag.to_lowercase();
        self.subjects.iter().find(|s| s.matches_tag(&tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl Default for SubjectCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_id_and_name() {
        let catalog = SubjectCatalog::builtin();

        assert_eq!(catalog.resolve("math").map(|s| s.id.as_str()), Some("math"));
        assert_eq!(catalog.resolve("MATH").map(|s| s.id.as_str()), Some("math"));
        assert_eq!(
            catalog.resolve("Mathematics").map(|s| s.id.as_str()),
            Some("math")
        );
        assert!(catalog.resolve("algebra").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = SubjectCatalog::new([
            Subject::new("art", "Art", "#000000", "🎨"),
            Subject::new("art", "Fine Arts", "#FFFFFF", "🖌"),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&SubjectId::new("art")).unwrap().name, "Art");
    }

    #[test]
    fn test_resolve_unicode_name() {
        let catalog = SubjectCatalog::new([Subject::new("rus", "Русский", "#123456", "🅡")]);
        assert_eq!(catalog.resolve("русский").map(|s| s.id.as_str()), Some("rus"));
    }
}
