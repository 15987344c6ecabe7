use super::PngWalk;
use crate::detect::Detector;
use crate::diagnostics::{emit, Diagnostic, DiagnosticSink};
use crate::error::{Result, UnsealError};
use crate::format::PNG_SIGNATURE;

/// Rebuild a PNG without the chunks the detector flags.
///
/// Kept chunks are copied with their length, type, data and CRC untouched;
/// CRCs are neither recomputed nor checked. Bytes after IEND are not carried
/// over. A walk that stopped on a chunk running past the end of the buffer
/// gets that incomplete chunk copied through as-is.
///
/// Returns `NoRemovableMetadataFound` when nothing was dropped.
pub fn strip(
    data: &[u8],
    walk: &PngWalk,
    detector: &Detector,
    sink: Option<&dyn DiagnosticSink>,
) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(&PNG_SIGNATURE);

    let mut dropped = 0usize;
    for (index, chunk) in walk.chunks.iter().enumerate() {
        if let Some(evidence) = detector.chunk_evidence(data, index, chunk) {
            emit(
                sink,
                Diagnostic::ChunkDropped {
                    index,
                    kind: chunk.kind,
                    evidence,
                },
            );
            dropped += 1;
            continue;
        }
        out.extend_from_slice(chunk.span().slice(data));
    }

    if dropped == 0 {
        return Err(UnsealError::NoRemovableMetadataFound);
    }

    if let Some(tail) = walk.damaged_tail(data.len()) {
        out.extend_from_slice(tail.slice(data));
        emit(
            sink,
            Diagnostic::DamagedTailKept {
                offset: tail.offset,
                len: tail.len,
            },
        );
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::png::{walk, ChunkType};

    fn chunk_bytes(kind: &[u8; 4], data: &[u8], crc: u32) -> Vec<u8> {
        let mut out = (data.len() as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(data);
        out.extend_from_slice(&crc.to_be_bytes());
        out
    }

    fn strip_all(data: &[u8]) -> Result<Vec<u8>> {
        let walked = walk(data).unwrap();
        strip(data, &walked, &Detector::default(), None)
    }

    #[test]
    fn test_strip_drops_flagged_itxt_only() {
        let ihdr = chunk_bytes(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0], 0x1234);
        let itxt = chunk_bytes(b"iTXt", b"XML:com.adobe.xmp\0\0\0\0\0<c2pa:manifest/>", 0);
        let idat = chunk_bytes(b"IDAT", &[0x78, 0x9C, 1, 2, 3], 0xABCD);
        let iend = chunk_bytes(b"IEND", &[], 0xAE426082);

        let mut data = PNG_SIGNATURE.to_vec();
        for chunk in [&ihdr, &itxt, &idat, &iend] {
            data.extend_from_slice(chunk);
        }

        let out = strip_all(&data).unwrap();

        let mut expected = PNG_SIGNATURE.to_vec();
        for chunk in [&ihdr, &idat, &iend] {
            expected.extend_from_slice(chunk);
        }
        assert_eq!(out, expected);
    }

    #[test]
    fn test_strip_drops_manifest_chunk() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend(chunk_bytes(b"IHDR", &[0; 13], 0));
        data.extend(chunk_bytes(b"caBX", &[0; 24], 0));
        data.extend(chunk_bytes(b"IEND", &[], 0));

        let out = strip_all(&data).unwrap();
        let kinds: Vec<ChunkType> = walk(&out).unwrap().chunks.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChunkType::IHDR, ChunkType::IEND]);
    }

    #[test]
    fn test_strip_keeps_bad_crc_and_drops_trailer() {
        let ihdr = chunk_bytes(b"IHDR", &[0; 13], 0xFFFF_FFFF);
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&ihdr);
        data.extend(chunk_bytes(b"tEXt", b"Comment\0contentcredentials", 0));
        data.extend(chunk_bytes(b"IEND", &[], 0));
        data.extend_from_slice(b"trailing junk");

        let out = strip_all(&data).unwrap();
        assert_eq!(&out[8..8 + ihdr.len()], &ihdr[..]);
        assert!(out.ends_with(b"IEND\0\0\0\0"));
    }

    #[test]
    fn test_strip_nothing_flagged() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend(chunk_bytes(b"IHDR", &[0; 13], 0));
        data.extend(chunk_bytes(b"tEXt", b"Author\0someone", 0));
        data.extend(chunk_bytes(b"IEND", &[], 0));

        assert_eq!(strip_all(&data), Err(UnsealError::NoRemovableMetadataFound));
    }

    #[test]
    fn test_strip_keeps_incomplete_trailing_chunk() {
        let ihdr = chunk_bytes(b"IHDR", &[0; 13], 0);
        let idat = chunk_bytes(b"IDAT", &[0x78, 0x9C, 1, 2, 3, 4, 5, 6], 0x0BAD);
        let iend = chunk_bytes(b"IEND", &[], 0xAE426082);

        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&ihdr);
        data.extend(chunk_bytes(b"iTXt", b"XML:com.adobe.xmp\0\0\0\0\0<c2pa:manifest/>", 0));
        let cut_at = data.len();
        data.extend_from_slice(&idat);
        data.extend_from_slice(&iend);
        data.truncate(data.len() - iend.len() - 3);

        let sink = RecordingSink::new();
        let walked = walk(&data).unwrap();
        let out = strip(&data, &walked, &Detector::default(), Some(&sink)).unwrap();

        let mut expected = PNG_SIGNATURE.to_vec();
        expected.extend_from_slice(&ihdr);
        expected.extend_from_slice(&data[cut_at..]);
        assert_eq!(out, expected);
        assert!(sink.snapshot().contains(&Diagnostic::DamagedTailKept {
            offset: cut_at,
            len: data.len() - cut_at,
        }));
    }
}
