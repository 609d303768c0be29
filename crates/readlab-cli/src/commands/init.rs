//! The `readlab init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("readlab.toml").exists() {
        println!("readlab.toml already exists, skipping.");
    } else {
        std::fs::write("readlab.toml", SAMPLE_CONFIG)?;
        println!("Created readlab.toml");
    }

    std::fs::create_dir_all("data")?;
    write_sample("data/story_english.txt", SAMPLE_STORY)?;
    write_sample("data/words_english.txt", SAMPLE_WORDS)?;

    println!("\nNext steps:");
    println!("  1. Point readlab.toml at your own corpora and word lists");
    println!("  2. Run: readlab languages");
    println!("  3. Run: readlab generate --language english --count 3");

    Ok(())
}

fn write_sample(path: &str, content: &str) -> Result<()> {
    let path = Path::new(path);
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# readlab content sources

[languages.english]
corpus = "data/story_english.txt"
words = "data/words_english.txt"
"#;

const SAMPLE_STORY: &str = "\
The river ran past the old mill at the edge of town. Every morning the \
children walked along the river on their way to school. The miller waved \
at the children from the door of the mill. One morning a small boat came \
down the river with a red sail. The children ran along the bank to follow \
the boat. The miller watched the red sail until it passed the bridge. \
That evening the children told their parents about the boat with the red \
sail. Nobody in town knew where the small boat had come from.
";

const SAMPLE_WORDS: &str = "\
mill
town
sail
boat
bank
bridge
river
school
morning
evening
red
old
small
";
