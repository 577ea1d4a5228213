use std::io::{self, BufRead, Write};

/// Resolve a secret from, in order: the command-line flag, an environment
/// variable, then an interactive prompt on stderr.
pub fn resolve(flag: Option<&str>, env_var: Option<&str>, label: &str) -> anyhow::Result<String> {
    let from_env = env_var.and_then(|name| std::env::var(name).ok());
    resolve_with(flag, from_env, || prompt(label))
}

fn resolve_with(
    flag: Option<&str>,
    from_env: Option<String>,
    ask: impl FnOnce() -> io::Result<String>,
) -> anyhow::Result<String> {
    if let Some(value) = flag {
        return Ok(value.to_string());
    }
    if let Some(value) = from_env.filter(|v| !v.is_empty()) {
        return Ok(value);
    }
    Ok(ask()?)
}

fn prompt(label: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
