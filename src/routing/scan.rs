use super::block::BlockTemplate;

/// Where the scanner currently is relative to managed blocks.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Region {
    Outside,
    /// `header_seen` flips once the `Host` line right after the marker is consumed.
    Inside { header_seen: bool },
}

/// Result of splitting a routing file into its foreign and managed parts.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Scan {
    /// Foreign lines, byte-for-byte and in original order.
    pub foreign: Vec<u8>,
    /// Number of managed blocks removed.
    pub removed_blocks: usize,
    /// True when the input ended while still inside a managed block.
    pub ended_inside: bool,
}

/// Drops every managed block from `content`, keeping everything else verbatim.
///
/// A marker line opens a block. The first unindented `Host` line after the
/// marker is the block's header. Indented lines belong to the block. The block
/// closes on a blank line (consumed as its terminator) or on any other
/// unindented line, which is kept as foreign content.
pub fn extract_foreign(content: &[u8], template: &BlockTemplate) -> Scan {
    let mut scan = Scan::default();
    let mut region = Region::Outside;

    for line in content.split_inclusive(|byte| *byte == b'\n') {
        if template.is_marker(line) {
            scan.removed_blocks += 1;
        }
        let (next, keep) = step(region, line, template);
        region = next;
        if keep {
            scan.foreign.extend_from_slice(line);
        }
    }

    scan.ended_inside = matches!(region, Region::Inside { .. });
    scan
}

fn step(region: Region, line: &[u8], template: &BlockTemplate) -> (Region, bool) {
    if template.is_marker(line) {
        return (Region::Inside { header_seen: false }, false);
    }

    match region {
        Region::Outside => (Region::Outside, true),
        Region::Inside { header_seen } => {
            if is_blank(line) {
                return (Region::Outside, false);
            }
            if is_indented(line) {
                return (region, false);
            }
            if !header_seen && is_host_header(line) {
                return (Region::Inside { header_seen: true }, false);
            }
            (Region::Outside, true)
        }
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

fn is_indented(line: &[u8]) -> bool {
    matches!(line.first(), Some(b' ' | b'\t'))
}

fn is_host_header(line: &[u8]) -> bool {
    line.split(u8::is_ascii_whitespace)
        .find(|word| !word.is_empty())
        .is_some_and(|keyword| keyword.eq_ignore_ascii_case(b"host"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> Scan {
        extract_foreign(content.as_bytes(), &BlockTemplate::default())
    }

    #[test]
    fn keeps_content_without_blocks() {
        let content = "Host example\n    HostName example.com\n\n# note\n";
        let result = scan(content);
        assert_eq!(result.foreign, content.as_bytes());
        assert_eq!(result.removed_blocks, 0);
        assert!(!result.ended_inside);
    }

    #[test]
    fn removes_block_between_foreign_lines() {
        let content = "L1\n# GitHub account: bob\nHost github.com-bob\n    HostName github.com\n    IdentityFile /k\n\nL2\n";
        let result = scan(content);
        assert_eq!(result.foreign, b"L1\nL2\n");
        assert_eq!(result.removed_blocks, 1);
    }

    #[test]
    fn unindented_line_closes_block_and_is_kept() {
        let content = "# GitHub account: bob\nHost github.com-bob\n    User git\nHost other\n    User me\n";
        let result = scan(content);
        assert_eq!(result.foreign, b"Host other\n    User me\n");
    }

    #[test]
    fn consecutive_blocks_are_all_removed() {
        let template = BlockTemplate::default();
        let content = format!(
            "{}{}",
            template.render("a", "/ka"),
            template.render("b", "/kb")
        );
        let result = scan(&content);
        assert!(result.foreign.is_empty());
        assert_eq!(result.removed_blocks, 2);
    }

    #[test]
    fn marker_directly_after_marker_opens_new_block() {
        let content = "# GitHub account: a\n# GitHub account: b\nHost github.com-b\n    User git\n";
        let result = scan(content);
        assert!(result.foreign.is_empty());
        assert_eq!(result.removed_blocks, 2);
    }

    #[test]
    fn file_ending_inside_block_drops_tail() {
        let content = "keep\n# GitHub account: a\nHost github.com-a\n    User git";
        let result = scan(content);
        assert_eq!(result.foreign, b"keep\n");
        assert!(result.ended_inside);
    }

    #[test]
    fn file_starting_with_indented_lines_is_foreign() {
        let content = "    orphan indented\nHost x\n";
        assert_eq!(scan(content).foreign, content.as_bytes());
    }

    #[test]
    fn indented_foreign_lines_after_blank_terminator_survive() {
        let content = "# GitHub account: a\nHost github.com-a\n    User git\n\n    IdentityFile /foreign\n";
        assert_eq!(scan(content).foreign, b"    IdentityFile /foreign\n");
    }

    #[test]
    fn second_host_line_closes_block() {
        let content = "# GitHub account: a\nHost github.com-a\nHost mine\n";
        assert_eq!(scan(content).foreign, b"Host mine\n");
    }

    #[test]
    fn preserves_crlf_foreign_lines() {
        let content = "Host win\r\n    User me\r\n";
        assert_eq!(scan(content).foreign, content.as_bytes());
    }

    #[test]
    fn keeps_non_utf8_foreign_bytes() {
        let content: &[u8] = b"# caf\xe9 server\n# GitHub account: a\nHost github.com-a\n    User git\n\nHost box\xff\n";
        let result = extract_foreign(content, &BlockTemplate::default());
        assert_eq!(result.foreign, b"# caf\xe9 server\nHost box\xff\n");
    }
}
