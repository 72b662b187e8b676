pub mod trace {
    use colored::Colorize;
    use regex::Regex;
    use std::io::Write;
    use std::thread;
    use tokio::time::Instant;

    const THREAD_ID_REGEX_STR: &str = "ThreadId\\(([[:digit:]]+)\\)";

    /// Installs the colored logger. Only records whose target matches
    /// `maybe_filter` are written, shortened to the regex's first capture group.
    /// Calling it again once a logger is installed does nothing.
    pub fn init(maybe_filter: Option<String>) {
        let launch_time = Instant::now();
        let target_regex_str = maybe_filter.unwrap_or_else(|| "(.*)".to_string());

        let target_regex = match Regex::new(target_regex_str.as_str()) {
            Ok(regex) => regex,
            Err(err) => {
                eprintln!("Invalid trace filter '{}': {}", target_regex_str, err);
                return;
            }
        };
        let thread_id_regex = Regex::new(THREAD_ID_REGEX_STR).unwrap();

        let mut binding = env_logger::builder();
        let builder = binding.format(move |buf, record| {
            let target = match target_regex
                .captures(record.target())
                .and_then(|c| c.get(1).or_else(|| c.get(0)))
            {
                Some(target) => target.as_str().to_string(),
                None => return Ok(()),
            };

            let thread_id_str = format!("{:?}", thread::current().id());
            let thread_id = thread_id_regex
                .captures(thread_id_str.as_str())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or(thread_id_str.clone());

            let elapsed = launch_time.elapsed().as_millis() as f32 / 1000.;

            writeln!(
                buf,
                "{:<8}{:<4}{:<6}{:<15}{}",
                elapsed.to_string().blue().bold(),
                thread_id.green().bold(),
                record.level().to_string().yellow(),
                target.red().bold(),
                record.args(),
            )
        });
        let _ = builder.try_init();
    }
}
