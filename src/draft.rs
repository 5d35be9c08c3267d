// Listing draft: the not-yet-submitted record of what the user typed and
// picked. Edits never mutate in place; each one yields a new draft so the
// form holder can swap it wholesale.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Max characters accepted for the item name.
pub const NAME_MAX_LEN: usize = 30;
/// Max characters accepted for the category.
pub const CATEGORY_MAX_LEN: usize = 12;
/// The only image extension the form accepts.
pub const IMAGE_EXTENSION: &str = "jpg";
/// MIME type sent with the image part.
pub const IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("no file was selected")]
    NoFileSelected,
    #[error("{0} is not a .jpg image")]
    UnsupportedImage(PathBuf),
    #[error("{0} does not name a file")]
    InvalidPath(PathBuf),
}

/// Handle to a local image file picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl ImageFile {
    /// Wrap a path. Only requires that the path ends in a file name; the
    /// extension filter is the presentation layer's concern.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, DraftError> {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| DraftError::InvalidPath(path.clone()))?;
        Ok(ImageFile { path, file_name })
    }
}

/// Mirrors the `accept=".jpg"` filter of the file input.
pub fn check_accepted_image(path: &Path) -> Result<(), DraftError> {
    let accepted = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(IMAGE_EXTENSION))
        .unwrap_or(false);
    if accepted {
        Ok(())
    } else {
        Err(DraftError::UnsupportedImage(path.to_path_buf()))
    }
}

/// The text fields of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    Name,
    Category,
}

impl TextField {
    /// Form field name, also used as the multipart part name.
    pub fn as_str(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Category => "category",
        }
    }

    pub fn max_len(self) -> usize {
        match self {
            TextField::Name => NAME_MAX_LEN,
            TextField::Category => CATEGORY_MAX_LEN,
        }
    }
}

/// A change event on one of the text inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    pub field: TextField,
    pub value: String,
}

impl FieldChange {
    pub fn new(field: TextField, value: impl Into<String>) -> Self {
        FieldChange {
            field,
            value: value.into(),
        }
    }
}

/// A change event on the file input: every file the user picked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSelection {
    pub files: Vec<PathBuf>,
}

impl FileSelection {
    pub fn new(files: Vec<PathBuf>) -> Self {
        FileSelection { files }
    }

    pub fn single(path: impl Into<PathBuf>) -> Self {
        FileSelection {
            files: vec![path.into()],
        }
    }

    /// The first selected file, the only one the form keeps.
    pub fn first(&self) -> Result<ImageFile, DraftError> {
        let path = self.files.first().ok_or(DraftError::NoFileSelected)?;
        ImageFile::from_path(path.clone())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingDraft {
    pub name: String,
    pub category: String,
    pub image: Option<ImageFile>,
}

impl ListingDraft {
    /// Copy of this draft with one text field replaced.
    pub fn with_text(&self, field: TextField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            TextField::Name => ListingDraft {
                name: value,
                ..self.clone()
            },
            TextField::Category => ListingDraft {
                category: value,
                ..self.clone()
            },
        }
    }

    /// Copy of this draft with the image replaced.
    pub fn with_image(&self, image: ImageFile) -> Self {
        ListingDraft {
            image: Some(image),
            ..self.clone()
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Category => &self.category,
        }
    }

    /// Required fields that are still empty, by form field name.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(TextField::Name.as_str());
        }
        if self.category.is_empty() {
            missing.push(TextField::Category.as_str());
        }
        if self.image.is_none() {
            missing.push("image");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_edit_per_field_wins_and_other_fields_are_untouched() {
        let edits = [
            (TextField::Name, "Sh"),
            (TextField::Category, "Cloth"),
            (TextField::Name, "Shirt"),
            (TextField::Category, "Clothing"),
            (TextField::Name, "Shirt!"),
        ];
        let image = ImageFile::from_path("/tmp/shirt.jpg").unwrap();
        let mut draft = ListingDraft::default().with_image(image.clone());
        for (field, value) in edits {
            let before = draft.clone();
            draft = draft.with_text(field, value);
            assert_eq!(draft.text(field), value);
            let other = match field {
                TextField::Name => TextField::Category,
                TextField::Category => TextField::Name,
            };
            assert_eq!(draft.text(other), before.text(other));
            assert_eq!(draft.image, Some(image.clone()));
        }
        assert_eq!(draft.name, "Shirt!");
        assert_eq!(draft.category, "Clothing");
    }

    #[test]
    fn single_file_selection_becomes_the_image() {
        let selection = FileSelection::single("/photos/shirt.jpg");
        let image = selection.first().unwrap();
        assert_eq!(image.file_name, "shirt.jpg");
        assert_eq!(image.path, PathBuf::from("/photos/shirt.jpg"));
    }

    #[test]
    fn only_the_first_of_several_files_is_kept() {
        let selection = FileSelection::new(vec!["a.jpg".into(), "b.jpg".into()]);
        assert_eq!(selection.first().unwrap().file_name, "a.jpg");
    }

    #[test]
    fn empty_selection_is_reported_not_panicked() {
        assert_eq!(
            FileSelection::default().first(),
            Err(DraftError::NoFileSelected)
        );
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        assert!(matches!(
            ImageFile::from_path("/"),
            Err(DraftError::InvalidPath(_))
        ));
    }

    #[test]
    fn accept_filter_only_lets_jpg_through() {
        assert!(check_accepted_image(Path::new("shirt.jpg")).is_ok());
        assert!(check_accepted_image(Path::new("SHIRT.JPG")).is_ok());
        assert!(check_accepted_image(Path::new("shirt.png")).is_err());
        assert!(check_accepted_image(Path::new("shirt")).is_err());
    }

    #[test]
    fn missing_fields_lists_every_empty_required_field() {
        let draft = ListingDraft::default();
        assert_eq!(draft.missing_fields(), vec!["name", "category", "image"]);
        let draft = draft
            .with_text(TextField::Name, "Shirt")
            .with_text(TextField::Category, "Clothing")
            .with_image(ImageFile::from_path("shirt.jpg").unwrap());
        assert!(draft.missing_fields().is_empty());
    }
}
