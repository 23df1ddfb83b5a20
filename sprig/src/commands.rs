pub fn is_command(input: &str) -> bool {
    matches!(input, "quit" | "exit" | "help")
}

/// Executes the given command.
pub fn exec_command(cmd: &str) {
    match cmd {
        "quit" | "exit" => {
            println!("bye!");
            std::process::exit(0);
        }
        "help" => {
            println!("Sprig - A Small Embeddable Lisp");
            println!("===============================");
            println!();
            println!("REPL Commands:");
            println!("  help        Show this help message");
            println!("  quit, exit  Exit the REPL");
            println!();
            println!("Basic Syntax:");
            println!("  Numbers:    42, -7, 3.14 (exact rationals: 3.14 is 157/50)");
            println!("  Strings:    \"hello\"");
            println!("  Globals:    true, false, nil");
            println!("  Calls:      (+ 1 2 3)");
            println!("  Comments:   ; to end of line");
            println!();
            println!("Special forms:");
            println!("  (if cond then else?)      Only false is falsy");
            println!("  (and ...) (or ...)        Short-circuiting");
            println!("  (var name value?)         Bind in the current scope");
            println!("  (set name value)          Mutate an existing binding");
            println!("  (do expr ...)             New scope, returns the last value");
            println!("  (func name? (a b) body)   Make a closure; a name enables recursion");
            println!();
            println!("Built-in functions:");
            println!("  + - * / == != error");
            println!();
            println!("Example:");
            println!("  > (func fact (n) (if (== n 0) 1 (* n (fact (- n 1)))))");
            println!("  > (fact 20)");
            println!("  = 2432902008176640000");
        }
        _ => unreachable!(),
    }
}
