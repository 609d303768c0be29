//! The `readlab generate` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use readlab_core::config::load_config_from;
use readlab_core::model::{Language, QuizSpec, QuizType};
use readlab_core::service::{ContentLibrary, QuizContentService};

pub fn execute(
    language: String,
    quiz_type: String,
    count: usize,
    length: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let language: Language = language.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let quiz_type: QuizType = quiz_type.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let config = load_config_from(config_path.as_deref())?;
    anyhow::ensure!(
        !config.languages.is_empty(),
        "no languages configured; run `readlab init` to create a starter config"
    );
    let library = ContentLibrary::from_config(&config)?;
    let service = QuizContentService::new(library);

    let spec = QuizSpec {
        language,
        quiz_type,
        count,
        word_length: length,
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let content = service.quiz_content(&spec, &mut rng)?;
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}
