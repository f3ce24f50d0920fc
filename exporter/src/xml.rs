//! `jobs.xml` output.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <jobs>
//!   <job id="118">
//!     <title>Forest Technician</title>
//!     <link>https://jobs.rwfm.tamu.edu/view-job/?id=118</link>
//!     <location>College Station, TX</location>
//!     <description>...</description>
//!   </job>
//! </jobs>
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use common::JobRecord;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

/// Serializes `jobs` into `inner` and hands it back.
pub fn write_jobs<W: Write>(inner: W, jobs: &[JobRecord]) -> quick_xml::Result<W> {
    let mut writer = Writer::new_with_indent(inner, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer.create_element("jobs").write_inner_content(|w| {
        for job in jobs {
            write_job(w, job)?;
        }
        Ok::<(), quick_xml::Error>(())
    })?;

    Ok(writer.into_inner())
}

fn write_job<W: Write>(writer: &mut Writer<W>, job: &JobRecord) -> quick_xml::Result<()> {
    let mut element = writer.create_element("job");
    if job.has_id() {
        element = element.with_attribute(("id", job.id.as_str()));
    }

    element.write_inner_content(|w| {
        let fields = [
            ("title", &job.title),
            ("link", &job.link),
            ("location", &job.location),
            ("description", &job.description),
        ];
        for (name, value) in fields {
            w.create_element(name)
                .write_text_content(BytesText::new(value))?;
        }
        Ok::<(), quick_xml::Error>(())
    })?;

    Ok(())
}

pub fn write_jobs_file(path: &Path, jobs: &[JobRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    let mut out = write_jobs(BufWriter::new(file), jobs)
        .with_context(|| format!("Failed to write XML to {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    Ok(())
}
