// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::path::Path;
use std::str::FromStr;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::registry::{is_skippable, DnsblEntry, Registry};
use crate::{Error, Result};

impl Registry {
    /// Loads a registry from a file, one `name = domain` entry per line.
    ///
    /// The first unparsable line or duplicate name aborts loading.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Registry> {
        let file = File::open(path).await?;
        let mut lines = BufReader::new(file).lines();

        let mut registry = Registry::new();
        let mut line_number = 0usize;
        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            let line = line.trim();
            if is_skippable(line) {
                continue;
            }
            DnsblEntry::from_str(line)
                .and_then(|entry| registry.add(entry))
                .map_err(|e| Error::ParserError {
                    what: line.to_string(),
                    to: "Registry",
                    why: format!("line {}: {}", line_number, e),
                })?;
        }
        debug!("Loaded {} entries from {} lines.", registry.len(), line_number);

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use spectral::prelude::*;

    use super::*;

    fn write_tmp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("blscan-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).expect("failed to create temp file");
        file.write_all(content.as_bytes()).expect("failed to write temp file");
        path
    }

    #[tokio::test]
    async fn load_from_file() {
        crate::utils::tests::logging::init();
        let path = write_tmp_file(
            "load_from_file",
            "# lists\nZen DNSBL = zen.spamhaus.org\nSpamCop = bl.spamcop.net\n",
        );

        let registry = Registry::from_file(&path).await;
        let _ = std::fs::remove_file(&path);

        assert_that(&registry).is_ok();
        assert_that(&registry.unwrap().len()).is_equal_to(2);
    }

    #[tokio::test]
    async fn load_from_file_aborts_on_error() {
        crate::utils::tests::logging::init();
        let path = write_tmp_file("aborts_on_error", "Zen DNSBL = zen.spamhaus.org\nthis is not an entry\n");

        let registry = Registry::from_file(&path).await;
        let _ = std::fs::remove_file(&path);

        assert_that(&registry).is_err();
    }

    #[tokio::test]
    async fn load_from_file_fails_on_duplicate_name() {
        crate::utils::tests::logging::init();
        let path = write_tmp_file("duplicate_name", "Zen = zen.spamhaus.org\nZen = bl.spamcop.net\n");

        let registry = Registry::from_file(&path).await;
        let _ = std::fs::remove_file(&path);

        assert_that(&matches!(registry, Err(Error::ParserError { .. }))).is_true();
    }

    #[tokio::test]
    async fn load_from_missing_file() {
        let registry = Registry::from_file("/this/file/does/not/exist").await;

        assert_that(&registry).is_err();
    }
}
