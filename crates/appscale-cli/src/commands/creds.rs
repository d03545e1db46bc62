//! Creds command - resolve and display operator credentials

use appscale_core::{
    CredentialMap, CredentialSource, DefaultCredentials, OperatorPrompt, obscure_creds,
};
use console::style;
use std::io::{self, Write};

use crate::error::{CliError, Result};
use crate::display::print_credentials;

/// Interactive prompt over stdin and a hidden password read
struct TerminalPrompt;

impl OperatorPrompt for TerminalPrompt {
    fn read_credentials(&self) -> appscale_core::Result<(String, String)> {
        print!("Enter your AppScale email address: ");
        io::stdout().flush()?;

        let mut username = String::new();
        io::stdin().read_line(&mut username)?;

        let password = rpassword::prompt_password("Enter your AppScale password: ")?;

        Ok((username.trim().to_string(), password))
    }
}

pub fn run(testing: bool, reveal: bool) -> Result<()> {
    let source = CredentialSource::from_process_env(DefaultCredentials::default());
    let (username, password) = source
        .get_credentials(testing, &TerminalPrompt)
        .map_err(|e| CliError::credentials(e.to_string()))?;

    let mut creds = CredentialMap::new();
    creds.insert("username".to_string(), username);
    creds.insert("password".to_string(), password);

    if reveal {
        println!("{}", style("Operator credentials:").cyan().bold());
        print_credentials(&creds);
    } else {
        println!("{}", style("Operator credentials (redacted):").cyan().bold());
        print_credentials(&obscure_creds(&creds));
    }

    Ok(())
}
