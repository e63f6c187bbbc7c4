//! Sample files for format-check tests.
//!
//! Shared by the unit tests and, through `#[path]`, the integration tests.

use image::{ImageFormat, Rgb, RgbImage};

/// Assemble numbered objects into a PDF with a valid cross-reference table.
///
/// Object `n` of the result is `objects[n - 1]`; object 1 must be the catalog.
pub fn pdf_from_objects(objects: &[String]) -> Vec<u8> {
    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    pdf
}

fn stream(content: &str) -> String {
    format!(
        "<< /Length {} >>\nstream\n{}\nendstream",
        content.len(),
        content
    )
}

/// A single-page PDF that draws one line.
pub fn minimal_pdf() -> Vec<u8> {
    pdf_from_objects(&[
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] /Resources << >> /Contents 4 0 R >>"
            .to_string(),
        stream("0 0 m 10 10 l S"),
    ])
}

/// A single-page Japanese PDF using a predefined CJK CMap.
///
/// Structurally valid, but text extraction does not support its encoding.
pub fn cjk_pdf() -> Vec<u8> {
    pdf_from_objects(&[
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        stream("BT /F1 12 Tf 10 100 Td <3042> Tj ET"),
        "<< /Type /Font /Subtype /Type0 /BaseFont /KozMinPr6N-Regular \
         /Encoding /UniJIS-UCS2-H /DescendantFonts [6 0 R] >>"
            .to_string(),
        "<< /Type /Font /Subtype /CIDFontType0 /BaseFont /KozMinPr6N-Regular \
         /CIDSystemInfo << /Registry (Adobe) /Ordering (Japan1) /Supplement 6 >> \
         /FontDescriptor 7 0 R /DW 1000 >>"
            .to_string(),
        "<< /Type /FontDescriptor /FontName /KozMinPr6N-Regular /Flags 6 \
         /FontBBox [-437 -340 1147 1317] /ItalicAngle 0 /Ascent 880 /Descent -120 \
         /CapHeight 742 /StemV 86 >>"
            .to_string(),
    ])
}

/// A 2x2 image encoded by the image crate.
pub fn small_image(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(2, 2, Rgb([200, 10, 10]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}

/// A 2x2 PNG.
pub fn small_png() -> Vec<u8> {
    small_image(ImageFormat::Png)
}

/// Every checked image extension with its encoder.
pub const IMAGE_FORMATS: [(&str, ImageFormat); 5] = [
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
];
