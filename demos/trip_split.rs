//! A weekend trip among four friends.
//!
//! Records shared expenses the way the interactive prompt would, then
//! shows how simplification shrinks the list of who pays whom.

use debt_ledger::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  debt-ledger: Weekend Trip Example       ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut session = Session::new(Ledger::new(), SessionConfig::default());
    let mut out = std::io::stdout();

    let script = [
        "add ana ben cleo dev",
        "ana paid 240 for all",
        "ben paid 90 for cleo dev",
        "cleo paid 60 for ana",
        "dev owes ben 25",
        "dev paid 48 for all",
    ];

    for line in script {
        println!("> {line}");
        if let Err(err) = session.handle_line(line, &mut out) {
            println!("** {err}");
        }
    }

    println!("\n━━━ Before simplifying ━━━\n");
    session.execute(Command::Print, &mut out).ok();

    let report = session.simplify();

    println!("\n━━━ After simplifying ━━━\n");
    session.execute(Command::Print, &mut out).ok();
    println!("\n{report}\n");

    println!("━━━ Net positions (unchanged) ━━━\n");
    session.execute(Command::Balances, &mut out).ok();

    let ledger = session.ledger();
    let total: rust_decimal::Decimal = (0..ledger.len())
        .filter_map(|i| ledger.net_position(i).ok())
        .sum();
    assert_eq!(total, dec!(0));
}
