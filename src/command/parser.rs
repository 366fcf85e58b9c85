use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// A command line that does not match the command grammar.
///
/// Parsing never touches the ledger, so the user can simply retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help' for the list of commands")]
    UnknownCommand(String),
    #[error("debt commands must contain 'owes' or 'paid'")]
    MissingDebtKeyword,
    #[error("'{command}' expects {expected}")]
    WrongArguments {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
}

/// Who shares the cost of a `paid` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Beneficiaries {
    /// Every participant in the ledger.
    All,
    /// The listed participants, as typed.
    Named(Vec<String>),
}

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Print,
    Balances,
    Stats,
    Help,
    Simplify,
    Clear,
    Quit,
    Add(Vec<String>),
    Save(PathBuf),
    Owes {
        debtor: String,
        lender: String,
        amount: Decimal,
    },
    Paid {
        payer: String,
        amount: Decimal,
        beneficiaries: Beneficiaries,
    },
}

pub const HELP_TEXT: &str = "\
  Accepted commands:
    help                                    prints this help
    print                                   prints current debts
    balances                                prints everyone's net position
    stats                                   prints debt count and total outstanding
    simplify                                simplifies current debts
    add <names...>                          adds participants
    clear                                   clears all debts (no confirmation)
    save <file>                             saves the ledger to a file
    quit                                    exits
    <name> owes <name> <amount>
    <name> paid <amount> for <names...>     splits evenly, payer included
    <name> paid <amount> for all";

impl Command {
    /// Parse one line. Blank lines parse to `None`.
    ///
    /// Keywords are matched case-insensitively; names are passed through
    /// as typed and normalized by the ledger. File paths keep their case.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            return Ok(None);
        };
        let rest = &tokens[1..];

        let command = match first.to_lowercase().as_str() {
            "print" => nullary(rest, "print", Command::Print)?,
            "balances" => nullary(rest, "balances", Command::Balances)?,
            "stats" => nullary(rest, "stats", Command::Stats)?,
            "help" => nullary(rest, "help", Command::Help)?,
            "simplify" => nullary(rest, "simplify", Command::Simplify)?,
            "clear" => nullary(rest, "clear", Command::Clear)?,
            "quit" => nullary(rest, "quit", Command::Quit)?,
            "add" => {
                if rest.is_empty() {
                    return Err(ParseError::WrongArguments {
                        command: "add",
                        expected: "at least one name",
                    });
                }
                Command::Add(rest.iter().map(|s| s.to_string()).collect())
            }
            "save" => match rest {
                [path] => Command::Save(PathBuf::from(*path)),
                _ => {
                    return Err(ParseError::WrongArguments {
                        command: "save",
                        expected: "exactly one file name",
                    })
                }
            },
            _ => parse_debt(&tokens)?,
        };
        Ok(Some(command))
    }
}

fn nullary(
    rest: &[&str],
    command: &'static str,
    parsed: Command,
) -> Result<Command, ParseError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(ParseError::WrongArguments {
            command,
            expected: "no arguments",
        })
    }
}

fn parse_debt(tokens: &[&str]) -> Result<Command, ParseError> {
    let keyword = tokens.get(1).map(|t| t.to_lowercase());
    match keyword.as_deref() {
        Some("owes") => match tokens {
            [debtor, _, lender, amount] => Ok(Command::Owes {
                debtor: debtor.to_string(),
                lender: lender.to_string(),
                amount: parse_amount(amount)?,
            }),
            _ => Err(ParseError::WrongArguments {
                command: "owes",
                expected: "<name> owes <name> <amount>",
            }),
        },
        Some("paid") => match tokens {
            [payer, _, amount, for_kw, names @ ..]
                if for_kw.eq_ignore_ascii_case("for") && !names.is_empty() =>
            {
                let beneficiaries = if let [only] = names {
                    if only.eq_ignore_ascii_case("all") {
                        Beneficiaries::All
                    } else {
                        Beneficiaries::Named(vec![only.to_string()])
                    }
                } else {
                    Beneficiaries::Named(names.iter().map(|s| s.to_string()).collect())
                };
                Ok(Command::Paid {
                    payer: payer.to_string(),
                    amount: parse_amount(amount)?,
                    beneficiaries,
                })
            }
            _ => Err(ParseError::WrongArguments {
                command: "paid",
                expected: "<name> paid <amount> for <names...|all>",
            }),
        },
        Some(_) => Err(ParseError::MissingDebtKeyword),
        None => Err(ParseError::UnknownCommand(tokens[0].to_string())),
    }
}

fn parse_amount(token: &str) -> Result<Decimal, ParseError> {
    let amount: Decimal = token
        .trim_start_matches('$')
        .parse()
        .map_err(|_| ParseError::InvalidAmount(token.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ParseError::NegativeAmount(amount));
    }
    Ok(amount)
}
