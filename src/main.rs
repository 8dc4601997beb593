//! uart-console - Main entry point
//!
//! Demo console with a handful of commands.
//! - ESP-IDF: console on UART0, console log on UART1 TX (GPIO6), 20 ms poll
//! - Host: stdin/stdout, console log on stderr

use core::fmt::Write;

use uart_console::{
    Args, CommandDescriptor, ConsoleConfig, LogStream, Session, TerminalMode,
    console::VERSION, log_drain,
};

const PROMPT: &str = "> ";

/// Demo commands
const COMMANDS: &[CommandDescriptor<'static>] = &[
    CommandDescriptor { name: "hello", help: "Welcome message", arity: Some(0), handler: &cmd_hello },
    CommandDescriptor { name: "echo", help: "Print each argument", arity: None, handler: &cmd_echo },
    CommandDescriptor { name: "list_terminals", help: "List known terminals", arity: Some(0), handler: &cmd_list_terminals },
    CommandDescriptor { name: "version", help: "Firmware version", arity: Some(0), handler: &cmd_version },
];

fn cmd_hello(_args: &Args<'_>, out: &mut dyn Write) {
    let _ = writeln!(out, "Hello World!");
}

fn cmd_echo(args: &Args<'_>, out: &mut dyn Write) {
    for (i, arg) in args.iter().enumerate() {
        let _ = writeln!(out, "{}: \"{}\"", i, arg);
    }
}

fn cmd_list_terminals(_args: &Args<'_>, out: &mut dyn Write) {
    for mode in TerminalMode::all() {
        let _ = writeln!(out, "  {}", mode.name());
    }
}

fn cmd_version(_args: &Args<'_>, out: &mut dyn Write) {
    let _ = writeln!(out, "{}", VERSION);
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    use uart_console::ByteSource;

    use host::{Stderr, Stdin, Stdout};

    // Terminal mode is fixed for the session: `console [minimal|echo|debug|vt102|debug_vt102]`
    let mode = std::env::args()
        .nth(1)
        .and_then(|name| TerminalMode::from_name(&name))
        .unwrap_or(TerminalMode::Vt102);

    let log: LogStream = LogStream::new();
    let mut session = Session::new(COMMANDS, Stdout::new(), ConsoleConfig::new(mode, PROMPT)).with_log(&log);
    let mut source = Stdin::new();

    session.print_banner();
    loop {
        // Prompt must be visible before stdin blocks
        session.show_prompt();
        session.sink_mut().flush();
        let Some(byte) = source.try_read_byte() else {
            break;
        };
        session.process_byte(byte);
        log_drain::drain_to(&log, &mut Stderr);
    }
    session.sink_mut().flush();
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::io::{Read, Write};

    use uart_console::{ByteSink, ByteSource};

    /// Blocking stdin. Line-buffered terminals send `\n`, the console wants `\r`.
    pub struct Stdin(std::io::Stdin);

    impl Stdin {
        pub fn new() -> Self {
            Self(std::io::stdin())
        }
    }

    impl ByteSource for Stdin {
        fn try_read_byte(&mut self) -> Option<u8> {
            let mut byte = [0u8; 1];
            match self.0.lock().read(&mut byte) {
                Ok(1) => Some(if byte[0] == b'\n' { b'\r' } else { byte[0] }),
                // EOF or a closed pipe ends the session
                _ => None,
            }
        }
    }

    pub struct Stdout(std::io::Stdout);

    impl Stdout {
        pub fn new() -> Self {
            Self(std::io::stdout())
        }

        pub fn flush(&mut self) {
            let _ = self.0.flush();
        }
    }

    impl ByteSink for Stdout {
        fn write_byte(&mut self, byte: u8) {
            let _ = self.0.write_all(&[byte]);
        }
    }

    pub struct Stderr;

    impl ByteSink for Stderr {
        fn write_byte(&mut self, byte: u8) {
            let _ = std::io::stderr().write_all(&[byte]);
        }

        fn write_bytes(&mut self, bytes: &[u8]) {
            let _ = std::io::stderr().write_all(bytes);
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::gpio::AnyIOPin;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{config::Config, UartDriver, UartTxDriver};
    use esp_idf_svc::hal::units::Hertz;

    use uart_console::ByteSource;

    use device::{UartSink, UartSource};

    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();

    let peripherals = Peripherals::take()?;
    let uart_config = Config::default().baudrate(Hertz(115_200));

    // UART0 default pins
    #[cfg(not(feature = "esp32p4"))]
    let (tx, rx) = (peripherals.pins.gpio43, peripherals.pins.gpio44);
    #[cfg(feature = "esp32p4")]
    let (tx, rx) = (peripherals.pins.gpio37, peripherals.pins.gpio38);

    let uart = UartDriver::new(
        peripherals.uart0,
        tx,
        rx,
        Option::<AnyIOPin>::None, // CTS
        Option::<AnyIOPin>::None, // RTS
        &uart_config,
    )?;

    // Console log, TX only
    let mut log_uart = UartTxDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio6,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_config,
    )?;

    let log: LogStream = LogStream::new();
    let mut session = Session::new(COMMANDS, UartSink(&uart), ConsoleConfig::new(TerminalMode::Vt102, PROMPT))
        .with_log(&log);
    let mut source = UartSource(&uart);

    session.print_banner();
    loop {
        // Drain whatever arrived since the last tick
        session.show_prompt();
        while let Some(byte) = source.try_read_byte() {
            session.process_byte(byte);
            session.show_prompt();
        }
        log_drain::drain_to(&log, &mut device::UartTxSink(&mut log_uart));
        FreeRtos::delay_ms(20);
    }
}

#[cfg(target_os = "espidf")]
mod device {
    use esp_idf_svc::hal::delay::NON_BLOCK;
    use esp_idf_svc::hal::uart::{UartDriver, UartTxDriver};

    use uart_console::{ByteSink, ByteSource};

    pub struct UartSource<'u, 'd>(pub &'u UartDriver<'d>);

    impl ByteSource for UartSource<'_, '_> {
        fn try_read_byte(&mut self) -> Option<u8> {
            let mut byte = [0u8; 1];
            match self.0.read(&mut byte, NON_BLOCK) {
                Ok(1) => Some(byte[0]),
                _ => None,
            }
        }
    }

    pub struct UartSink<'u, 'd>(pub &'u UartDriver<'d>);

    impl ByteSink for UartSink<'_, '_> {
        fn write_byte(&mut self, byte: u8) {
            let _ = self.0.write(&[byte]);
        }

        fn write_bytes(&mut self, bytes: &[u8]) {
            let _ = self.0.write(bytes);
        }
    }

    pub struct UartTxSink<'u, 'd>(pub &'u mut UartTxDriver<'d>);

    impl ByteSink for UartTxSink<'_, '_> {
        fn write_byte(&mut self, byte: u8) {
            let _ = self.0.write(&[byte]);
        }

        fn write_bytes(&mut self, bytes: &[u8]) {
            let _ = self.0.write(bytes);
        }
    }
}
