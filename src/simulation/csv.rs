// src/simulation/csv.rs

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;

use crate::error::DesignError;

/// CSV出力の設定とヘッダーの書き込み
pub fn setup_csv_output(path: &str) -> Result<Box<dyn Write>, DesignError> {
    let output_file = File::create(path)?;
    let mut writer = BufWriter::new(output_file);
    write_csv_header(&mut writer)?;
    Ok(Box::new(writer))
}

/// CSVヘッダーの書き込み
pub fn write_csv_header<W: Write + ?Sized>(writer: &mut W) -> Result<(), std::io::Error> {
    writer.write_all(b"time(s),sample,output(N)\n")
}

/// CSV行の作成
pub fn create_csv_row(time: f64, sample: f64, output: f64) -> String {
    format!("{:.4},{:.6},{:.6}\n", time, sample, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_row() {
        let mut buffer: Vec<u8> = Vec::new();
        write_csv_header(&mut buffer).unwrap();
        buffer.extend_from_slice(create_csv_row(0.5, -1.0, -50.0).as_bytes());

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "time(s),sample,output(N)\n0.5000,-1.000000,-50.000000\n");
    }
}
