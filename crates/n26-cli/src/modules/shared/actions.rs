use crate::modules::auth::Prompter;

/// Asks a yes/no question; anything but `y` aborts the operation.
pub(crate) fn confirm(prompter: &dyn Prompter, question: &str) -> anyhow::Result<()> {
    let answer = prompter
        .read_line(&format!("{question} (y/N) "))
        .map_err(|_| anyhow::anyhow!("could not read confirmation"))?;
    if !answer.trim().eq_ignore_ascii_case("y") {
        anyhow::bail!("the transfer was not performed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::ScriptedPrompter;

    #[test]
    fn only_yes_confirms() {
        assert!(confirm(&ScriptedPrompter::new(["y"]), "Sure?").is_ok());
        assert!(confirm(&ScriptedPrompter::new(["Y "]), "Sure?").is_ok());

        let err = confirm(&ScriptedPrompter::new(["yes please"]), "Sure?").expect_err("no");
        assert_eq!(err.to_string(), "the transfer was not performed");
        assert!(confirm(&ScriptedPrompter::default(), "Sure?").is_err());
    }
}
