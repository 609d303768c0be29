//! The `readlab languages` command.

use std::path::PathBuf;

use anyhow::Result;

use readlab_core::config::load_config_from;
use readlab_core::service::ContentLibrary;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let library = ContentLibrary::from_config(&config)?;

    let listing = library.languages();
    if listing.is_empty() {
        println!("No languages configured. Run `readlab init` to create a config file.");
        return Ok(());
    }

    for support in listing {
        let mut kinds = Vec::new();
        if support.sentences {
            kinds.push("sentence");
        }
        if support.words {
            kinds.push("word");
        }
        println!("{} — {} quizzes", support.language, kinds.join(", "));
    }

    Ok(())
}
