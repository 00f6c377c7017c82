use std::io::{BufRead, Write};

use super::types::{Account, AccountId, SignInPrompt};
use crate::error::AppResult;

/// Sign-in prompt on the terminal: menus and instructions go to stderr,
/// choices are read from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl SignInPrompt for ConsolePrompt {
    fn prompt_for_account_selection(&self, accounts: &[Account]) -> AppResult<Option<AccountId>> {
        if accounts.is_empty() {
            return Ok(None);
        }
        let stdin = std::io::stdin();
        let mut stderr = std::io::stderr();
        select_account(accounts, &mut stdin.lock(), &mut stderr)
    }

    fn show_sign_in_instructions(&self, message: &str) {
        eprintln!("{}", message);
    }
}

pub(super) fn select_account<R, W>(
    accounts: &[Account],
    input: &mut R,
    output: &mut W,
) -> AppResult<Option<AccountId>>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Select an account to sign in with:")?;
    for (idx, account) in accounts.iter().enumerate() {
        writeln!(output, "  [{}] {}", idx.saturating_add(1), account.username)?;
    }
    writeln!(output, "  [0] Use another account")?;

    loop {
        write!(output, "> ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let choice = line.trim();
        if choice.is_empty() || choice == "0" {
            return Ok(None);
        }
        let picked = choice
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|idx| accounts.get(idx));
        match picked {
            Some(account) => return Ok(Some(account.id.clone())),
            None => writeln!(output, "Enter a number between 0 and {}.", accounts.len())?,
        }
    }
}
