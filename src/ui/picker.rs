use dialoguer::theme::ColorfulTheme;
use dialoguer::FuzzySelect;

use crate::{OwSshError, Result};

/// Present a fuzzy-filter prompt over `items`.
///
/// Blocks until the operator picks an entry or cancels (Esc/q). Returns the
/// chosen item, or `None` on cancellation so the caller decides how to wind
/// down instead of exiting from inside the prompt.
pub fn fuzzy_pick(prompt: &str, items: &[String]) -> Result<Option<String>> {
    if items.is_empty() {
        return Ok(None);
    }

    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(OwSshError::prompt)?;

    Ok(selection.map(|idx| items[idx].clone()))
}
