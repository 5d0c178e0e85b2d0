use std::io::{self, BufRead, Write};

const HEADER: &str = "epoch,train_loss,val_loss,pixel_accuracy,mean_iou";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochRecord {
    pub epoch: usize,
    pub train_loss: f32,
    pub val_loss: f32,
    pub pixel_accuracy: f32,
    pub mean_iou: f32,
}

/// Per-epoch losses of one training run, in epoch order.
#[derive(Clone, Debug, Default)]
pub struct LossHistory {
    pub records: Vec<EpochRecord>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EpochRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;

        for r in &self.records {
            writeln!(
                writer,
                "{},{},{},{},{}",
                r.epoch, r.train_loss, r.val_loss, r.pixel_accuracy, r.mean_iou
            )?;
        }

        Ok(())
    }

    /// Reads a history written by [`LossHistory::write`]. Only the first three
    /// columns are required; missing metrics default to zero.
    pub fn read<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut lines = reader.lines();

        let header = lines
            .next()
            .transpose()?
            .ok_or_else(|| invalid_data("Missing header line"))?;
        if !header.trim().starts_with("epoch,train_loss,val_loss") {
            return Err(invalid_data(format!("Unexpected header: {}", header)));
        }

        let mut history = Self::new();
        for (line_no, line_res) in lines.enumerate() {
            let line = line_res?;
            if line.trim().is_empty() {
                continue;
            }
            let record = parse_record(&line)
                .map_err(|e| invalid_data(format!("Line {}: {}", line_no + 2, e)))?;
            history.push(record);
        }

        Ok(history)
    }
}

fn parse_record(line: &str) -> Result<EpochRecord, String> {
    let mut parts = line.split(',').map(str::trim);

    let mut field = |name: &str| parts.next().ok_or_else(|| format!("Missing {} field", name));

    let epoch = field("epoch")?;
    let train_loss = field("train_loss")?;
    let val_loss = field("val_loss")?;
    let pixel_accuracy = field("pixel_accuracy").unwrap_or("0");
    let mean_iou = field("mean_iou").unwrap_or("0");

    Ok(EpochRecord {
        epoch: epoch.parse().map_err(|_| format!("Invalid epoch: {}", epoch))?,
        train_loss: parse_f32(train_loss)?,
        val_loss: parse_f32(val_loss)?,
        pixel_accuracy: parse_f32(pixel_accuracy)?,
        mean_iou: parse_f32(mean_iou)?,
    })
}

fn parse_f32(value: &str) -> Result<f32, String> {
    value
        .parse::<f32>()
        .map_err(|_| format!("Invalid number: {}", value))
}

fn invalid_data<E: Into<Box<dyn std::error::Error + Send + Sync>>>(error: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, error)
}
