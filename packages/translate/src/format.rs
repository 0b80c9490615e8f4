/// printf-style positional substitution covering the `%s` and `%d`
/// placeholders used by translation catalogs. Placeholders beyond the
/// argument list survive verbatim, so a partially applied format can be
/// fed back through later.
pub fn sprintf(format: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars().peekable();
    let mut next = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') | Some('d') => {
                if next < args.len() {
                    chars.next();
                    out.push_str(args[next]);
                    next += 1;
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
