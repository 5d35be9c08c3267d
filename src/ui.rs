// UI layer: interactive menu built on `dialoguer`. The prompts play the
// part of the HTML inputs, so the required/maxLength/accept constraints
// are enforced here and the form component stays validation-free.

use crate::api::{ApiClient, Item};
use crate::draft::{check_accepted_image, FieldChange, FileSelection, TextField};
use crate::listing::{ListingForm, SubmitEvent, SubmitOutcome};
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

/// Main interactive menu. Runs until the user picks "Exit".
pub fn main_menu(api: ApiClient) -> Result<()> {
    loop {
        let items = vec![
            "List an item",
            "Show listed items",
            "Show an item",
            "Search items",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_listing(&api)?,
            1 => show_items(&api),
            2 => handle_show_item(&api)?,
            3 => handle_search(&api)?,
            4 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Fill in a fresh listing form and submit it. The form is dropped when
/// the flow ends, which is what discards the draft.
fn handle_listing(api: &ApiClient) -> Result<()> {
    let completed = Rc::new(Cell::new(false));
    let flag = completed.clone();
    let mut form = ListingForm::new(api).on_listing_completed(move || flag.set(true));

    for field in [TextField::Name, TextField::Category] {
        let value = prompt_text(field)?;
        form.on_change(FieldChange::new(field, value));
    }

    loop {
        let selection = pick_image()?;
        match form.on_image_change(&selection) {
            Ok(()) => break,
            Err(e) => println!("{}", e),
        }
    }

    let missing = form.values().missing_fields();
    if !missing.is_empty() {
        println!("Please fill in: {}", missing.join(", "));
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Listing this item...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcome = form.on_submit(&mut SubmitEvent::new());
    spinner.finish_and_clear();

    match outcome {
        SubmitOutcome::Completed if completed.get() => {
            println!("Item listed.");
            show_items(api);
        }
        _ => println!("Listing failed, see the log output for details."),
    }
    Ok(())
}

fn prompt_text(field: TextField) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(field.as_str())
        .validate_with(move |input: &String| validate_text(field, input))
        .interact_text()?;
    Ok(value)
}

/// `required` plus `maxLength` for a text input.
pub fn validate_text(field: TextField, input: &str) -> Result<(), String> {
    let max = field.max_len();
    if input.trim().is_empty() {
        Err(format!("{} is required", field.as_str()))
    } else if input.chars().count() > max {
        Err(format!("{} must be at most {} characters", field.as_str(), max))
    } else {
        Ok(())
    }
}

/// `required` plus `accept=".jpg"` for a typed image path.
pub fn validate_image_path(input: &str) -> Result<(), String> {
    let path = Path::new(input.trim());
    check_accepted_image(path).map_err(|e| e.to_string())?;
    if !path.is_file() {
        return Err(format!("{} does not exist", path.display()));
    }
    Ok(())
}

/// Ask for the image either through the native picker or as a typed
/// path. Cancelling the picker yields an empty selection.
fn pick_image() -> Result<FileSelection> {
    let choices = vec!["Browse for a .jpg image", "Type the image path"];
    let choice = Select::new().items(&choices).default(0).interact()?;
    if choice == 0 {
        let picked = rfd::FileDialog::new()
            .add_filter("JPEG image", &["jpg"])
            .pick_file();
        return Ok(FileSelection::new(picked.into_iter().collect()));
    }
    let path: String = Input::new()
        .with_prompt("image")
        .validate_with(|input: &String| validate_image_path(input))
        .interact_text()?;
    Ok(FileSelection::single(PathBuf::from(path.trim())))
}

/// Print the current item list. Fetch errors are reported, not raised.
fn show_items(api: &ApiClient) {
    match api.fetch_items() {
        Ok(items) => print_items(api, &items.items),
        Err(e) => println!("Could not load items: {:#}", e),
    }
}

fn handle_show_item(api: &ApiClient) -> Result<()> {
    let id: i64 = Input::new().with_prompt("Item id").interact_text()?;
    match api.fetch_item(id) {
        Ok(Some(item)) => println!("{}", describe_item(api, &item)),
        Ok(None) => println!("No item with id {}.", id),
        Err(e) => println!("Could not load item: {:#}", e),
    }
    Ok(())
}

fn handle_search(api: &ApiClient) -> Result<()> {
    let keyword: String = Input::new().with_prompt("Keyword").interact_text()?;
    match api.search_items(keyword.trim()) {
        Ok(items) => print_items(api, &items.items),
        Err(e) => println!("Search failed: {:#}", e),
    }
    Ok(())
}

fn print_items(api: &ApiClient, items: &[Item]) {
    if items.is_empty() {
        println!("No items found.");
    }
    for item in items {
        println!("{}", describe_item(api, item));
    }
}

/// One line per item: optional `#id`, name, category and image URL.
pub fn describe_item(api: &ApiClient, item: &Item) -> String {
    let mut line = String::new();
    if let Some(id) = item.id {
        line.push_str(&format!("#{} ", id));
    }
    line.push_str(&format!("{} [{}]", item.name, item.category));
    if let Some(file) = &item.image_filename {
        line.push_str(&format!(" {}", api.image_url(file)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn text_inputs_are_required() {
        assert!(validate_text(TextField::Name, "").is_err());
        assert!(validate_text(TextField::Category, "   ").is_err());
    }

    #[test]
    fn text_inputs_respect_max_length_in_characters() {
        assert!(validate_text(TextField::Name, &"a".repeat(30)).is_ok());
        assert!(validate_text(TextField::Name, &"a".repeat(31)).is_err());
        assert!(validate_text(TextField::Category, &"ä".repeat(12)).is_ok());
        assert!(validate_text(TextField::Category, &"ä".repeat(13)).is_err());
    }

    #[test]
    fn image_path_must_be_an_existing_jpg() {
        assert!(validate_image_path("").is_err());
        assert!(validate_image_path("photo.png").is_err());
        assert!(validate_image_path("/definitely/not/here/photo.jpg").is_err());

        let path = std::env::temp_dir().join(format!(
            "mercari_listing_cli_ui_test_{}.jpg",
            std::process::id()
        ));
        std::fs::write(&path, b"\xFF\xD8\xFF").unwrap();
        assert!(validate_image_path(path.to_str().unwrap()).is_ok());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn item_line_shows_only_the_fields_present() {
        let api = ApiClient::new(&Config::new("http://localhost:9000")).unwrap();
        let full = Item {
            id: Some(3),
            name: "Shirt".into(),
            category: "Clothing".into(),
            image_filename: Some("ab.jpg".into()),
        };
        assert_eq!(
            describe_item(&api, &full),
            "#3 Shirt [Clothing] http://localhost:9000/image/ab.jpg"
        );
        let bare = Item {
            id: None,
            image_filename: None,
            ..full
        };
        assert_eq!(describe_item(&api, &bare), "Shirt [Clothing]");
    }
}
