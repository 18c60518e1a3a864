//! Command parsing utilities for extracting command names from redis requests.

use redis::{Arg, Cmd};

/// Read one `\r\n`-terminated line starting at `pos`, returning the line
/// contents and the position just past the terminator.
fn read_line(buf: &[u8], pos: usize) -> Option<(&[u8], usize)> {
    let rest = buf.get(pos..)?;
    let end = rest.windows(2).position(|w| w == b"\r\n")?;
    Some((&rest[..end], pos + end + 2))
}

fn parse_len(line: &[u8], marker: u8) -> Option<usize> {
    if line.first() != Some(&marker) {
        return None;
    }
    std::str::from_utf8(&line[1..]).ok()?.parse().ok()
}

/// Parse the arguments of the first command in a RESP-packed request.
///
/// Packed commands are arrays of bulk strings (`*N\r\n$len\r\n<data>\r\n...`).
/// Returns `None` for anything that does not parse as one.
pub fn parse_packed_args(packed: &[u8]) -> Option<Vec<Vec<u8>>> {
    let (header, mut pos) = read_line(packed, 0)?;
    let count = parse_len(header, b'*')?;

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        let (len_line, data_start) = read_line(packed, pos)?;
        let len = parse_len(len_line, b'$')?;
        // A hostile length header can be up to usize::MAX; never let it
        // overflow the slice bounds.
        let data_end = data_start.checked_add(len)?;
        let data = packed.get(data_start..data_end)?;
        args.push(data.to_vec());
        pos = data_end.checked_add(2)?;
    }
    Some(args)
}

/// Parsed command information for span creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The command name as the caller supplied it (e.g. `"HSET"`).
    /// Empty when the request carries no command name.
    pub name: String,
    /// All arguments, command name included.
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Extract the command name and arguments from a [`Cmd`].
    pub fn from_cmd(cmd: &Cmd) -> Self {
        let args: Vec<String> = cmd
            .args_iter()
            .map(|arg| match arg {
                Arg::Simple(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                Arg::Cursor => "0".to_string(),
            })
            .collect();
        Self::from_args(args)
    }

    /// Extract the command name and arguments from a RESP-packed request.
    ///
    /// Unparseable input degrades to an empty command name rather than
    /// failing; the command still executes and is still traced.
    pub fn from_packed(packed: &[u8]) -> Self {
        let args = parse_packed_args(packed)
            .unwrap_or_default()
            .into_iter()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .collect();
        Self::from_args(args)
    }

    fn from_args(args: Vec<String>) -> Self {
        let name = args.first().cloned().unwrap_or_default();
        Self { name, args }
    }

    /// Generate a span name from the parsed command.
    ///
    /// Format: `"<namespace>/<COMMAND>"`.
    pub fn span_name(&self, namespace: &str) -> String {
        format!("{}/{}", namespace, self.name)
    }

    /// The full command text, space-joined, for opt-in statement logging.
    pub fn statement(&self) -> String {
        self.args.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cmd() {
        let mut cmd = redis::cmd("HSET");
        cmd.arg("programs").arg("space").arg(1961);

        let parsed = ParsedCommand::from_cmd(&cmd);
        assert_eq!(parsed.name, "HSET");
        assert_eq!(parsed.args, vec!["HSET", "programs", "space", "1961"]);
    }

    #[test]
    fn test_from_cmd_empty() {
        let parsed = ParsedCommand::from_cmd(&Cmd::new());
        assert_eq!(parsed.name, "");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_from_packed() {
        let mut cmd = redis::cmd("HGET");
        cmd.arg("programs").arg("space");

        let parsed = ParsedCommand::from_packed(&cmd.get_packed_command());
        assert_eq!(parsed.name, "HGET");
        assert_eq!(parsed.args, vec!["HGET", "programs", "space"]);
    }

    #[test]
    fn test_from_packed_garbage() {
        let parsed = ParsedCommand::from_packed(b"not a resp request");
        assert_eq!(parsed.name, "");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_from_packed_oversized_length() {
        // A bulk-string header claiming usize::MAX bytes must degrade to an
        // empty name, not overflow the bounds arithmetic.
        let parsed = ParsedCommand::from_packed(b"*1\r\n$18446744073709551615\r\n");
        assert_eq!(parsed.name, "");
        assert!(parsed.args.is_empty());

        assert!(parse_packed_args(b"*2\r\n$3\r\nGET\r\n$18446744073709551613\r\nx\r\n").is_none());
    }

    #[test]
    fn test_from_packed_truncated() {
        assert!(parse_packed_args(b"*2\r\n$3\r\nGET\r\n$3\r\nfo").is_none());
        assert!(parse_packed_args(b"*1\r\n").is_none());
    }

    #[test]
    fn test_parse_packed_args() {
        let args = parse_packed_args(b"*2\r\n$3\r\nGET\r\n$3\r\nfoo\r\n").unwrap();
        assert_eq!(args, vec![b"GET".to_vec(), b"foo".to_vec()]);
    }

    #[test]
    fn test_span_name() {
        let parsed = ParsedCommand::from_cmd(&redis::cmd("HSET"));
        assert_eq!(parsed.span_name("redis-go"), "redis-go/HSET");

        let parsed = ParsedCommand::from_cmd(&Cmd::new());
        assert_eq!(parsed.span_name("redis-go"), "redis-go/");
    }

    #[test]
    fn test_statement() {
        let mut cmd = redis::cmd("SET");
        cmd.arg("key").arg("value");
        assert_eq!(ParsedCommand::from_cmd(&cmd).statement(), "SET key value");
    }
}
