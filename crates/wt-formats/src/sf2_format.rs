//! SoundFont 2 bank reader.
//!
//! Only what a sample export needs: the bank name, the `smpl` PCM pool and
//! the `shdr` sample headers. Presets, instruments and generators are
//! skipped.

use binrw::io::Cursor;
use binrw::BinRead;
use wt_ir::{SampleInfo, SampleType};

use crate::FormatError;

/// A loaded SF2 bank.
#[derive(Clone, Debug, Default)]
pub struct SoundFont {
    /// Bank name from `INFO/INAM`
    pub name: String,
    samples: Vec<SampleInfo>,
    pcm: Vec<u8>,
}

impl SoundFont {
    pub fn samples(&self) -> &[SampleInfo] {
        &self.samples
    }

    pub fn sample(&self, index: usize) -> Option<&SampleInfo> {
        self.samples.get(index)
    }

    /// The whole 16-bit PCM pool.
    pub fn pcm_pool(&self) -> &[u8] {
        &self.pcm
    }

    /// PCM bytes of one sample, sliced at its `start`.
    pub fn sample_bytes(&self, index: usize) -> Result<&[u8], FormatError> {
        let sample = self.sample(index).ok_or(FormatError::NoSuchSample(index))?;
        self.pcm
            .get(sample.start..sample.end)
            .ok_or(FormatError::SampleOutOfRange {
                index,
                start: sample.start,
                end: sample.end,
                pool: self.pcm.len(),
            })
    }
}

/// Load an SF2 bank from raw bytes.
pub fn load_sf2(data: &[u8]) -> Result<SoundFont, FormatError> {
    if data.len() < 12 {
        return Err(FormatError::UnexpectedEof);
    }
    if &data[0..4] != b"RIFF" || &data[8..12] != b"sfbk" {
        return Err(FormatError::InvalidHeader);
    }
    let riff_size = read_u32_le(data, 4) as usize;
    // the size must at least cover the `sfbk` form type
    if riff_size < 4 {
        return Err(FormatError::InvalidHeader);
    }
    let body = &data[12..8usize.saturating_add(riff_size).min(data.len())];

    let mut bank = SoundFont::default();
    let mut shdr: Option<&[u8]> = None;
    let mut have_smpl = false;

    for chunk in read_chunks(body)? {
        if chunk.id != *b"LIST" {
            log::debug!("skipping top-level {} chunk", chunk.name());
            continue;
        }
        if chunk.body.len() < 4 {
            return Err(FormatError::InvalidChunk("LIST"));
        }
        let list_type = &chunk.body[0..4];
        for sub in read_chunks(&chunk.body[4..])? {
            log::debug!(
                "{}/{}: {} bytes",
                String::from_utf8_lossy(list_type),
                sub.name(),
                sub.body.len()
            );
            match (list_type, &sub.id) {
                (b"INFO", b"INAM") => bank.name = parse_string(sub.body),
                (b"sdta", b"smpl") => {
                    bank.pcm = sub.body.to_vec();
                    have_smpl = true;
                }
                (b"sdta", b"sm24") => {
                    log::warn!(
                        "ignoring sm24 chunk ({} bytes); samples are exported as 16-bit",
                        sub.body.len()
                    );
                }
                (b"pdta", b"shdr") => shdr = Some(sub.body),
                _ => {}
            }
        }
    }

    if !have_smpl {
        return Err(FormatError::MissingChunk("smpl"));
    }
    let shdr = shdr.ok_or(FormatError::MissingChunk("shdr"))?;
    bank.samples = parse_sample_headers(shdr)?;
    Ok(bank)
}

struct Chunk<'a> {
    id: [u8; 4],
    body: &'a [u8],
}

impl Chunk<'_> {
    fn name(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }
}

/// Walk a sequence of RIFF chunks; bodies are padded to even length.
fn read_chunks(data: &[u8]) -> Result<Vec<Chunk<'_>>, FormatError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos + 8 <= data.len() {
        let id = [data[pos], data[pos + 1], data[pos + 2], data[pos + 3]];
        let size = read_u32_le(data, pos + 4) as usize;
        let start = pos + 8;
        let end = start.checked_add(size).ok_or(FormatError::UnexpectedEof)?;
        if end > data.len() {
            return Err(FormatError::UnexpectedEof);
        }
        chunks.push(Chunk { id, body: &data[start..end] });

        pos = end;
        if pos % 2 != 0 {
            pos += 1;
        }
    }
    Ok(chunks)
}

/// Size of one `shdr` record.
const SHDR_RECORD_LEN: usize = 46;

#[derive(BinRead, Debug)]
#[br(little)]
struct ShdrRecord {
    name: [u8; 20],
    start: u32,
    end: u32,
    start_loop: u32,
    end_loop: u32,
    sample_rate: u32,
    original_pitch: u8,
    pitch_correction: i8,
    sample_link: u16,
    sample_type: u16,
}

impl ShdrRecord {
    /// SF2 offsets count sample points; the exporter works in bytes.
    fn into_sample_info(self) -> SampleInfo {
        let mut sample = SampleInfo::new(&parse_string(&self.name));
        sample.start = self.start as usize * 2;
        sample.end = self.end as usize * 2;
        sample.start_loop = self.start_loop as usize * 2;
        sample.end_loop = self.end_loop as usize * 2;
        sample.sample_rate = self.sample_rate;
        sample.original_pitch = self.original_pitch;
        sample.pitch_correction = self.pitch_correction;
        sample.sample_link = self.sample_link;
        sample.sample_type = SampleType(self.sample_type);
        sample
    }
}

fn parse_sample_headers(data: &[u8]) -> Result<Vec<SampleInfo>, FormatError> {
    if data.len() % SHDR_RECORD_LEN != 0 {
        return Err(FormatError::InvalidChunk("shdr"));
    }
    let count = data.len() / SHDR_RECORD_LEN;
    let mut cursor = Cursor::new(data);
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(ShdrRecord::read(&mut cursor)?);
    }

    // The list ends with a terminal "EOS" record.
    if records.last().is_some_and(|r| parse_string(&r.name) == "EOS") {
        records.pop();
    }
    Ok(records.into_iter().map(ShdrRecord::into_sample_info).collect())
}

/// Parse a null-terminated string from bytes.
fn parse_string(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    String::from_utf8_lossy(&data[..end]).trim().to_string()
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend(id);
        buf.extend(&(body.len() as u32).to_le_bytes());
        buf.extend(body);
        if body.len() % 2 != 0 {
            buf.push(0);
        }
        buf
    }

    fn list(kind: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
        let mut body = kind.to_vec();
        for c in chunks {
            body.extend(c);
        }
        chunk(b"LIST", &body)
    }

    fn shdr_record(name: &str, points: [u32; 4], sample_type: u16) -> Vec<u8> {
        let mut rec = [0u8; 20].to_vec();
        rec[..name.len()].copy_from_slice(name.as_bytes());
        for p in points {
            rec.extend(&p.to_le_bytes());
        }
        rec.extend(&22050u32.to_le_bytes());
        rec.push(60);
        rec.push(5);
        rec.extend(&0u16.to_le_bytes());
        rec.extend(&sample_type.to_le_bytes());
        rec
    }

    /// Build a minimal SF2 bank: INFO/INAM, sdta/smpl, pdta/shdr.
    fn make_sf2(pcm: &[u8], headers: &[Vec<u8>]) -> Vec<u8> {
        let mut shdr = Vec::new();
        for h in headers {
            shdr.extend(h);
        }
        shdr.extend(shdr_record("EOS", [0; 4], 0));

        let mut body = b"sfbk".to_vec();
        body.extend(list(b"INFO", &[chunk(b"INAM", b"Test Bank\0")]));
        body.extend(list(b"sdta", &[chunk(b"smpl", pcm)]));
        body.extend(list(b"pdta", &[chunk(b"shdr", &shdr)]));

        let mut file = b"RIFF".to_vec();
        file.extend(&(body.len() as u32).to_le_bytes());
        file.extend(body);
        file
    }

    #[test]
    fn reads_bank_name_and_samples() {
        let pcm = vec![0u8; 64];
        let sf2 = make_sf2(
            &pcm,
            &[
                shdr_record("Flute C4", [0, 16, 4, 12], 1),
                shdr_record("Flute C5", [16, 32, 20, 28], 1),
            ],
        );
        let bank = load_sf2(&sf2).unwrap();
        assert_eq!(bank.name, "Test Bank");
        assert_eq!(bank.samples().len(), 2);
        assert_eq!(bank.pcm_pool().len(), 64);

        let s = &bank.samples()[1];
        assert_eq!(s.name.as_str(), "Flute C5");
        assert_eq!(s.sample_rate, 22050);
        assert_eq!(s.original_pitch, 60);
        assert_eq!(s.pitch_correction, 5);
        assert!(s.is_mono());
    }

    #[test]
    fn sample_points_become_byte_offsets() {
        let sf2 = make_sf2(&[0u8; 64], &[shdr_record("A", [2, 30, 6, 20], 1)]);
        let s = load_sf2(&sf2).unwrap().samples()[0].clone();
        assert_eq!((s.start, s.start_loop, s.end_loop, s.end), (4, 12, 40, 60));
    }

    #[test]
    fn sample_bytes_slice_at_start() {
        let pcm: Vec<u8> = (0..64).collect();
        let sf2 = make_sf2(&pcm, &[shdr_record("A", [4, 8, 5, 6], 1)]);
        let bank = load_sf2(&sf2).unwrap();
        assert_eq!(bank.sample_bytes(0).unwrap(), &pcm[8..16]);
    }

    #[test]
    fn sample_past_pool_is_out_of_range() {
        let sf2 = make_sf2(&[0u8; 16], &[shdr_record("A", [0, 100, 10, 20], 1)]);
        let bank = load_sf2(&sf2).unwrap();
        assert!(matches!(
            bank.sample_bytes(0),
            Err(FormatError::SampleOutOfRange { index: 0, end: 200, pool: 16, .. })
        ));
        assert!(matches!(bank.sample_bytes(1), Err(FormatError::NoSuchSample(1))));
    }

    #[test]
    fn sm24_is_ignored() {
        let mut body = b"sfbk".to_vec();
        body.extend(list(
            b"sdta",
            &[chunk(b"smpl", &[0u8; 8]), chunk(b"sm24", &[0u8; 4])],
        ));
        body.extend(list(b"pdta", &[chunk(b"shdr", &shdr_record("EOS", [0; 4], 0))]));
        let mut file = b"RIFF".to_vec();
        file.extend(&(body.len() as u32).to_le_bytes());
        file.extend(body);

        let bank = load_sf2(&file).unwrap();
        assert_eq!(bank.pcm_pool().len(), 8);
        assert!(bank.samples().is_empty());
    }

    #[test]
    fn invalid_header_rejected() {
        assert!(matches!(load_sf2(b"RIFF\0\0\0\0WAVEfmt "), Err(FormatError::InvalidHeader)));
    }

    #[test]
    fn too_short_rejected() {
        assert!(matches!(load_sf2(&[0; 10]), Err(FormatError::UnexpectedEof)));
    }

    #[test]
    fn too_small_riff_size_rejected() {
        for size in 0u32..4 {
            let mut file = b"RIFF".to_vec();
            file.extend(&size.to_le_bytes());
            file.extend(b"sfbk");
            assert!(matches!(load_sf2(&file), Err(FormatError::InvalidHeader)));
        }
    }

    #[test]
    fn missing_shdr_rejected() {
        let mut body = b"sfbk".to_vec();
        body.extend(list(b"sdta", &[chunk(b"smpl", &[0u8; 8])]));
        let mut file = b"RIFF".to_vec();
        file.extend(&(body.len() as u32).to_le_bytes());
        file.extend(body);
        assert!(matches!(load_sf2(&file), Err(FormatError::MissingChunk("shdr"))));
    }

    #[test]
    fn truncated_chunk_rejected() {
        let mut sf2 = make_sf2(&[0u8; 64], &[shdr_record("A", [0, 16, 4, 12], 1)]);
        sf2.truncate(sf2.len() - 10);
        assert!(matches!(load_sf2(&sf2), Err(FormatError::UnexpectedEof)));
    }

    #[test]
    fn ragged_shdr_rejected() {
        let mut shdr = shdr_record("A", [0, 16, 4, 12], 1);
        shdr.push(0);
        shdr.push(0);
        let mut body = b"sfbk".to_vec();
        body.extend(list(b"sdta", &[chunk(b"smpl", &[0u8; 8])]));
        body.extend(list(b"pdta", &[chunk(b"shdr", &shdr)]));
        let mut file = b"RIFF".to_vec();
        file.extend(&(body.len() as u32).to_le_bytes());
        file.extend(body);
        assert!(matches!(load_sf2(&file), Err(FormatError::InvalidChunk("shdr"))));
    }
}
