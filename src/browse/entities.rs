/// Decode HTML character references in channel titles and owner names.
///
/// Handles the common named entities plus decimal (`&#39;`) and hex
/// (`&#x27;`) references. Anything unrecognised is kept verbatim.
pub fn decode(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').filter(|&end| end <= 10) {
            Some(end) => match decode_reference(&tail[1..end]) {
                Some(c) => {
                    out.push(c);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            },
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::decode;

    #[test]
    fn named_entities() {
        assert_eq!(decode("Rock &amp; Roll"), "Rock & Roll");
        assert_eq!(decode("&lt;b&gt; &quot;x&quot;"), "<b> \"x\"");
    }

    #[test]
    fn numeric_entities() {
        assert_eq!(decode("Don&#39;t"), "Don't");
        assert_eq!(decode("Don&#x27;t"), "Don't");
        assert_eq!(decode("caf&#233;"), "café");
    }

    #[test]
    fn unknown_or_unterminated_kept() {
        assert_eq!(decode("AT&T"), "AT&T");
        assert_eq!(decode("&bogus; &"), "&bogus; &");
        assert_eq!(decode("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(decode("Ambient / Drone"), "Ambient / Drone");
    }
}
