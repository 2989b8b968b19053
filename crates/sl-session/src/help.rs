use std::io;

use crate::console::Console;

pub const GENERAL_HELP: &str = "\
GENERAL HELP
----------------------------------------
KEYBOARD SHORTCUTS:
  h      - show the help menu
  s      - skip the current item
  Ctrl+C - exit the program

INPUT VALIDATION:
  - text is folded to 7-bit ASCII for console compatibility
  - records longer than max_len characters are skipped automatically
  - missing or empty required fields are skipped automatically
  - skipped items are logged with privacy-preserving hashes

REPRODUCIBILITY:
  - items are shuffled using the seed value (--seed, default 42)
  - the same seed replays the same order on any machine

METRICS:
  - accuracy: overall correct labeling rate
  - precision: of items labeled X, how many were actually X
  - recall: of actual X items, how many were labeled X
  - F1: harmonic mean of precision and recall

PRIVACY:
  - logs store previews with SHA-256 digests, never full text
  - output files contain the original text content";

const MENU_RULE: &str =
    "======================================================================";
const SECTION_RULE: &str =
    "----------------------------------------------------------------------";

/// The help sub-menu. Stays open until the operator presses Enter with no
/// selection; any choice prints its text and returns to the menu. EOF exits
/// the menu (the labeling prompt will see it next).
pub fn run_help_menu<C: Console>(
    console: &mut C,
    intro: &str,
    task_help: &str,
) -> io::Result<()> {
    console.print("");
    console.print(MENU_RULE);
    console.print("HELP MENU");
    console.print(MENU_RULE);
    console.print("");
    console.print("Help options:");
    console.print("  1 - Show task-specific help");
    console.print("  2 - Recall introduction message");
    console.print("  3 - Show general help");
    console.print("");

    loop {
        let Some(choice) = console.read_line("Select help option (1-3) or Enter to exit help: ")?
        else {
            break;
        };
        match choice.as_str() {
            "" => break,
            "1" => print_section(console, task_help),
            "2" => print_section(console, intro),
            "3" => print_section(console, GENERAL_HELP),
            _ => console.print("Please select 1, 2, 3, or press Enter to exit help."),
        }
    }

    console.print("Returning to labeling...");
    Ok(())
}

fn print_section<C: Console>(console: &mut C, text: &str) {
    console.print("");
    console.print(SECTION_RULE);
    console.print(text);
    console.print(SECTION_RULE);
    console.print("");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
