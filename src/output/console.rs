use crate::aggregate::found_only;
use crate::probe::ProbeVerdict;

const GREEN: &str = "\x1b[1;92m";
const RED: &str = "\x1b[1;91m";
const MAGENTA: &str = "\x1b[1;95m";
const CYAN: &str = "\x1b[1;96m";
const RESET: &str = "\x1b[0m";

pub fn print_ascii_logo() {
    println!("{}{}{}", CYAN, r#"
     _   _                 _ _        _   _             _
    | | | | __ _ _ __   __| | | ___  | | | |_   _ _ __ | |_ ___ _ __
    | |_| |/ _` | '_ \ / _` | |/ _ \ | |_| | | | | '_ \| __/ _ \ '__|
    |  _  | (_| | | | | (_| | |  __/ |  _  | |_| | | | | ||  __/ |
    |_| |_|\__,_|_| |_|\__,_|_|\___| |_| |_|\__,_|_| |_|\__\___|_|

                      Username Search v0.1.0
    "#, RESET);
}

/// One console line for a verdict, with ANSI colors.
pub fn format_verdict(v: &ProbeVerdict) -> String {
    if v.found {
        format!("{}[✓] {} → {}{}", GREEN, v.service_name, v.resolved_url, RESET)
    } else {
        format!("{}[✗] {} (not found){}", RED, v.service_name, RESET)
    }
}

pub fn print_results(items: &[ProbeVerdict], only_found: bool) {
    println!("\n{}Results:{}", MAGENTA, RESET);
    let shown: Vec<&ProbeVerdict> = if only_found { found_only(items) } else { items.iter().collect() };
    for it in shown {
        println!("{}", format_verdict(it));
    }
}

/// "N of M sites report an account", shared by console and reports.
pub fn summary_line(items: &[ProbeVerdict]) -> String {
    format!("{} of {} sites report an account", found_only(items).len(), items.len())
}

pub fn print_summary(items: &[ProbeVerdict], elapsed_secs: f64) {
    println!("\n{}", "-".repeat(60));
    println!("[*] {} ({:.1}s)", summary_line(items), elapsed_secs);
}
