//! Verbose diagnostic dumps of extraction results
//!
//! Each renderer writes nothing for an empty input; otherwise a title line,
//! a dashed rule and one block per item.

use crate::model::{Comment, StructModel};
use std::fmt::{self, Write};

const RULE: &str = "----------------------------------------------------";

pub fn write_comments<W: Write>(w: &mut W, comments: &[Comment]) -> fmt::Result {
    if comments.is_empty() {
        return Ok(());
    }

    writeln!(w, "Comments")?;
    writeln!(w, "{RULE}")?;
    for comment in comments {
        writeln!(w, "Comment:")?;
        writeln!(w, "    value={}", comment.text.trim_end_matches('\n'))?;
        writeln!(w, "    loc={}", comment.line)?;
    }
    Ok(())
}

pub fn write_structs<W: Write>(w: &mut W, structs: &[StructModel]) -> fmt::Result {
    if structs.is_empty() {
        return Ok(());
    }

    writeln!(w, "Structs")?;
    writeln!(w, "{RULE}")?;
    for s in structs {
        writeln!(w, "Struct:")?;
        writeln!(w, "    dirname={}", s.name)?;
        writeln!(w, "    loc={}", s.line)?;
        writeln!(w, "    Fields:")?;
        for f in &s.fields {
            writeln!(
                w,
                "        dirname={} type={} ptr={} optional={} skip={}",
                f.name, f.base_type, f.is_pointer, f.is_optional, f.is_skipped
            )?;
        }
    }
    Ok(())
}

pub fn write_imports<W: Write>(w: &mut W, imports: &[String]) -> fmt::Result {
    if imports.is_empty() {
        return Ok(());
    }

    writeln!(w, "Imports")?;
    writeln!(w, "{RULE}")?;
    for import in imports {
        writeln!(w, "    {import}")?;
    }
    Ok(())
}

/// Render one of the dumps into a `String`.
pub fn render<T: ?Sized>(items: &T, writer: fn(&mut String, &T) -> fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writer(&mut out, items);
    out
}
