use colored::*;

use crate::compiler::RosterCompiler;

pub fn debug_print(compiler: &RosterCompiler, tag: &str, message: &str) {
    if compiler.debug {
        println!("{} {}", tag.green(), message.bright_blue());
    }
}

pub fn debug_error(compiler: &RosterCompiler, tag: &str, message: &str) {
    if compiler.debug {
        println!("{} {}", tag.red(), message.bright_red());
    }
}

pub fn debug_model_state(compiler: &RosterCompiler) {
    if !compiler.debug {
        return;
    }

    println!("{}", "🔍 Model state:".yellow().bold());
    println!(
        "   {} days, {} doctors, {} full weekends",
        compiler.calendar.len(),
        compiler.doctors.len(),
        compiler.calendar.full_weekends.len()
    );
    println!(
        "   {} assignment variables, {} constraints",
        compiler.assign.len().to_string().cyan(),
        compiler.constraints.len().to_string().cyan()
    );
    if compiler.slack_active {
        println!(
            "   {}",
            format!("slack day active on {:?}", compiler.config.slack_weekday).yellow()
        );
    }
    for (di, doctor) in compiler.doctors.iter().enumerate() {
        let available = (0..compiler.calendar.len())
            .filter(|i| compiler.assign.contains_key(&(*i, di)))
            .count();
        println!(
            "   {}: available {available}/{} days",
            doctor.name.blue(),
            compiler.calendar.len()
        );
    }
}
