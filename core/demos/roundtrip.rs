//! Write vectors into a gzip + base64 quoted string, then scan them back.

use std::io::Cursor;

use wreck::prelude::*;

fn main() -> Result<()> {
    //
    // Writing
    //
    let sink = TextSafeWriter::new(Vec::new(), true);
    let mut w = StreamWriter::<f32, _>::new(sink)?
        .with_limits(FieldLimits::default().with_max_unique_key(8));

    // write only UniqueKey and Vector
    for i in 0..16u8 {
        w.write(&[i], &[], &[0.1, 0.2, 0.3, 0.4])?;
    }
    let written = w.counters().clone();
    let text = w.into_inner().close()?;

    println!("{}", String::from_utf8_lossy(&text));

    //
    // Reading
    //
    let source = TextSafeReader::new(Cursor::new(text), true)?;
    let mut r = StreamScanner::<f32, _>::new(source)?;

    while StreamScanner::scan(&mut r) {
        let hex: String = r.unique_key().iter().map(|b| format!("{b:02x}")).collect();
        println!("{} : {:?}", hex, r.vector());
    }

    if let Some(err) = r.take_err() {
        return Err(err);
    }

    println!("records written {}, read {}", written.records, r.counters().records);
    Ok(())
}
