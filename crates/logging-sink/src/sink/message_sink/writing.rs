use std::io::{self, Write};

use super::MessageSink;
use crate::level::EmitLevel;
use crate::sink::Sink;

impl<W> Sink for MessageSink<W>
where
    W: Write + Send,
{
    fn write(&self, level: EmitLevel, text: &str) -> io::Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        let line = self.layout.render(level, text);
        let mut state = self.lock();
        state.writer.write_all(line.as_bytes())?;
        if state.line_mode.append_newline() {
            state.writer.write_all(b"\n")?;
        }
        if level >= self.flush_on {
            state.writer.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().writer.flush()
    }

    fn set_minimum_level(&self, level: EmitLevel) {
        self.store_minimum_level(level);
    }

    fn minimum_level(&self) -> EmitLevel {
        self.minimum_level_value()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use crate::{EmitLevel, LineMode, MessageSink, Sink, SinkLayout};

    #[derive(Default)]
    struct CountingWriter {
        bytes: Vec<u8>,
        flushes: usize,
    }

    impl io::Write for CountingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn reports_below_minimum_are_dropped() {
        let sink = MessageSink::memory().with_minimum_level(EmitLevel::Warn);
        sink.write(EmitLevel::Info, "quiet").unwrap();
        sink.write(EmitLevel::Warn, "loud").unwrap();
        assert_eq!(sink.lines(), vec!["loud"]);
    }

    #[test]
    fn minimum_level_can_change_after_construction() {
        let sink = MessageSink::memory();
        sink.set_minimum_level(EmitLevel::Off);
        sink.write(EmitLevel::Critical, "silenced").unwrap();
        assert!(sink.contents().is_empty());
        assert_eq!(sink.minimum_level(), EmitLevel::Off);
    }

    #[test]
    fn warnings_flush_immediately() {
        let sink = MessageSink::new(CountingWriter::default());
        sink.write(EmitLevel::Info, "buffered").unwrap();
        sink.write(EmitLevel::Warn, "flushed").unwrap();
        let writer = sink.into_inner();
        assert_eq!(writer.flushes, 1);
    }

    #[test]
    fn flush_level_is_configurable() {
        let sink = MessageSink::new(CountingWriter::default()).with_flush_on(EmitLevel::Trace);
        sink.write(EmitLevel::Debug, "a").unwrap();
        sink.write(EmitLevel::Info, "b").unwrap();
        assert_eq!(sink.into_inner().flushes, 2);
    }

    #[test]
    fn layout_is_applied_before_writing() {
        let sink = MessageSink::memory().with_layout(SinkLayout::file(true));
        sink.write(EmitLevel::Error, "bad").unwrap();
        assert_eq!(sink.contents(), "[   error] bad\n");
    }

    #[test]
    fn line_mode_toggles_newline() {
        let sink = MessageSink::memory();
        sink.set_line_mode(LineMode::WithoutNewline);
        sink.write(EmitLevel::Info, "a").unwrap();
        sink.set_line_mode(LineMode::WithNewline);
        sink.write(EmitLevel::Info, "b").unwrap();
        assert_eq!(sink.contents(), "ab\n");
    }

    #[test]
    fn clear_discards_captured_output() {
        let sink = MessageSink::memory();
        sink.write(EmitLevel::Info, "gone").unwrap();
        sink.clear();
        assert!(sink.lines().is_empty());
    }
}
