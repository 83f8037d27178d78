use crossterm::style::Stylize;

use wordtree::{Dictionary, Lookup, NodeRef, Suggestions};

pub fn print_load_summary(dict: &Dictionary) {
    println!("Dictionary loaded successfully");
    let total = format!("Total words: {}", dict.words_read());
    let height = format!("Tree height: {}", dict.tree().height());
    println!("{}", total.yellow());
    println!("{}", height.yellow());
}

pub fn print_lookup(token: &str, lookup: Lookup) {
    match lookup {
        Lookup::Found(_) => {
            println!("{}", format!("'{}' found in dictionary.", token).green());
        }
        Lookup::Missing(suggs) => {
            println!("{}", format!("'{}' NOT found in dictionary.", token).red());
            print_suggestions(suggs);
        }
    }
}

fn print_suggestions(suggs: Option<Suggestions>) {
    println!("Suggestions:");
    match suggs {
        Some(suggs) => {
            println!("1) Closest node visited: {}", suggs.closest.word());
            println!("2) Successor: {}", or_none(suggs.successor));
            println!("3) Predecessor: {}", or_none(suggs.predecessor));
        }
        None => println!("No suggestions available."),
    }
}

fn or_none<'t>(node: Option<NodeRef<'t>>) -> &'t str {
    node.map_or("(none)", |n| n.word())
}
