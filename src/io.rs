use std::fs;
use std::io::Write;
use std::path::Path;

use log::warn;

use crate::error::{Error, Result};
use crate::stats::Summary;
use crate::translation::{Translation, VirtualAddress};

/// Parsed address file
#[derive(Debug, Default)]
pub struct AddressList {
    pub addresses: Vec<VirtualAddress>,
    /// `(line, content)` of every malformed line that was skipped
    pub skipped: Vec<(usize, String)>,
}

/// Read a line-oriented address file.
///
/// Blank lines are ignored. A malformed line is an `InvalidAddress` error,
/// or a warning plus an entry in `skipped` when `skip_invalid` is set.
pub fn read_virtual_addresses<P: AsRef<Path>>(path: P, skip_invalid: bool) -> Result<AddressList> {
    let content = fs::read_to_string(path.as_ref()).map_err(|source| Error::Io {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    parse_addresses(&content, skip_invalid)
}

pub fn parse_addresses(content: &str, skip_invalid: bool) -> Result<AddressList> {
    let mut list = AddressList::default();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match VirtualAddress::parse(idx + 1, line) {
            Ok(va) => list.addresses.push(va),
            Err(Error::InvalidAddress { line, content }) if skip_invalid => {
                warn!("skipping invalid address on line {}: {:?}", line, content);
                list.skipped.push((line, content));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(list)
}

/// Write one line per translation followed by the summary block
pub fn write_results<W: Write>(
    out: &mut W,
    results: &[Translation],
    summary: &Summary,
) -> std::io::Result<()> {
    for r in results {
        writeln!(out, "{}", r)?;
    }

    let stats = &summary.stats;
    writeln!(out, "Number of Translated Addresses = {}", stats.translated)?;
    writeln!(out, "Page Faults = {}", stats.page_faults)?;
    writeln!(out, "Page Fault Rate = {:.3}", summary.page_fault_rate)?;
    writeln!(out, "TLB Hits = {}", stats.tlb_hits)?;
    writeln!(out, "TLB Hit Rate = {:.3}", summary.tlb_hit_rate)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stats;
    use crate::translation::Access;

    #[test]
    fn test_parse_addresses() {
        let list = parse_addresses("16916\n62493\n\n30198\n", false).unwrap();
        let raw: Vec<u16> = list.addresses.iter().map(|va| va.va).collect();
        assert_eq!(raw, vec![16916, 62493, 30198]);
        assert!(list.skipped.is_empty());
    }

    #[test]
    fn test_parse_addresses_crlf() {
        let list = parse_addresses("1\r\n2\r\n", false).unwrap();
        assert_eq!(list.addresses.len(), 2);
    }

    #[test]
    fn test_parse_addresses_fails_fast() {
        match parse_addresses("1\n2\nbogus\n4\n", false) {
            Err(Error::InvalidAddress { line, content }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "bogus");
            }
            other => panic!("expected InvalidAddress, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_addresses_skip_invalid() {
        let list = parse_addresses("1\n70000\nbogus\n4\n", true).unwrap();
        let raw: Vec<u16> = list.addresses.iter().map(|va| va.va).collect();
        assert_eq!(raw, vec![1, 4]);
        assert_eq!(
            list.skipped,
            vec![(2, "70000".to_string()), (3, "bogus".to_string())]
        );
    }

    #[test]
    fn test_missing_file() {
        match read_virtual_addresses("/nonexistent/addresses.txt", false) {
            Err(Error::Io { path, .. }) => assert!(path.ends_with("addresses.txt")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_results() {
        let address = VirtualAddress::from_raw(16916);
        let results = [Translation {
            address,
            access: Access::PageFault { evicted: None },
            tlb_slot: 0,
            frame: 0,
            physical: 20,
            value: 0,
        }];
        let summary = Stats {
            translated: 3,
            page_faults: 1,
            tlb_hits: 2,
        }
        .summary()
        .unwrap();

        let mut out = Vec::new();
        write_results(&mut out, &results, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Virtual address: 16916 TLB: 0 Physical address: 20 Value: 0\n\
             Number of Translated Addresses = 3\n\
             Page Faults = 1\n\
             Page Fault Rate = 0.333\n\
             TLB Hits = 2\n\
             TLB Hit Rate = 0.667\n"
        );
    }
}
