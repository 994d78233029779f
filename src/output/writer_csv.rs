use crate::probe::ProbeVerdict;
use csv::Writer;
use std::fs::File;
use std::path::Path;

pub fn write_csv(path: &Path, items: &[ProbeVerdict]) -> anyhow::Result<()> {
    let f = File::create(path)?;
    let mut w = Writer::from_writer(f);
    w.write_record(["service", "url", "found"])?;
    for it in items {
        w.write_record([
            it.service_name.as_str(),
            it.resolved_url.as_str(),
            if it.found { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}
