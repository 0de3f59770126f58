//! Drive an interactive gnuplot process through its standard input.
//!
//! A [`Figure`] owns one `gnuplot` process and the temporary data files its plots reference.
//! Commands are buffered line by line and sent to gnuplot when the figure is shown.
//!
//! # Examples
//!
//! ```no_run
//! use gnupipe::prelude::*;
//!
//! # fn main() -> Result<(), gnupipe::Error> {
//! let mut figure = Figure::new(Options::default().set(Replot(true)))?;
//!
//! figure.set("grid")?.set("key outside top horizontal")?;
//! figure.plot(Plot::new("sin(x)").named("dashtype", 0))?;
//! figure.plot(
//!     Plot::new(vec![0., 1.])
//!         .named("y", vec![0., 0.5])
//!         .named("w", "lines")
//!         .named("linecolor", "'red'"),
//! )?;
//! figure.show()?;
//! figure.close();
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(bare_trait_objects)]
#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;

use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::num::ParseIntError;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::str;

use crate::data::DataFile;
use crate::plot::{Kind, Source};
use crate::traits::Set;

mod data;
mod error;
mod value;

pub mod plot;
pub mod prelude;
pub mod proxy;
pub mod traits;

pub use crate::data::format_sample;
pub use crate::error::{Error, Result};
pub use crate::plot::Plot;
pub use crate::value::Value;

/// Configuration of a [`Figure`], fixed when the gnuplot process is spawned
#[derive(Clone, Debug)]
pub struct Options {
    args: Vec<Cow<'static, str>>,
    interactive: bool,
    output: Output,
    program: Cow<'static, Path>,
    replot: bool,
    verbose: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            args: Vec::new(),
            interactive: true,
            output: Output::Inherit,
            program: Cow::Borrowed(Path::new("gnuplot")),
            replot: false,
            verbose: false,
        }
    }
}

impl Set<Args> for Options {
    /// Arguments passed to the external program
    ///
    /// **Note** gnuplot is started without arguments by default
    fn set(mut self, args: Args) -> Options {
        self.args = args.0;
        self
    }
}

impl Set<Interactive> for Options {
    /// Whether `show` waits for a line on stdin before returning
    ///
    /// **Note** Figures are interactive by default
    fn set(mut self, interactive: Interactive) -> Options {
        self.interactive = interactive.0;
        self
    }
}

impl Set<Program> for Options {
    /// Changes the external program
    ///
    /// **Note** The default program is `gnuplot`, looked up in `PATH`
    fn set(mut self, program: Program) -> Options {
        self.program = program.0;
        self
    }
}

impl Set<Replot> for Options {
    /// Whether plots after the first one draw onto the current plot
    fn set(mut self, replot: Replot) -> Options {
        self.replot = replot.0;
        self
    }
}

impl Set<Output> for Options {
    /// Where the output streams of the process go
    fn set(mut self, output: Output) -> Options {
        self.output = output;
        self
    }
}

impl Set<Verbose> for Options {
    /// Whether every command is echoed, to stdout unless [`Figure::echo_to`] says otherwise
    fn set(mut self, verbose: Verbose) -> Options {
        self.verbose = verbose.0;
        self
    }
}

/// Arguments of the external program
pub struct Args(Vec<Cow<'static, str>>);

/// Pause for operator input on `show`
#[derive(Clone, Copy)]
pub struct Interactive(pub bool);

/// Path of the external plotting program
pub struct Program(Cow<'static, Path>);

/// Reuse the current plot for subsequent plot calls
#[derive(Clone, Copy)]
pub struct Replot(pub bool);

/// Echo commands as they are issued
#[derive(Clone, Copy)]
pub struct Verbose(pub bool);

/// Destination of the external program's output streams, stdout and stderr alike
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Output {
    /// Shared with the calling process
    Inherit,
    /// Discarded
    Null,
}

impl Output {
    fn stdio(self) -> Stdio {
        match self {
            Output::Inherit => Stdio::inherit(),
            Output::Null => Stdio::null(),
        }
    }
}

/// A live gnuplot session
///
/// Dropping the figure closes it.
pub struct Figure {
    data_files: Vec<DataFile>,
    echo: Box<dyn Write + Send>,
    interactive: bool,
    plot_count: usize,
    process: Option<Child>,
    replot: bool,
    script: String,
    verbose: bool,
}

impl Figure {
    /// Spawns the external program with a piped stdin
    pub fn new(options: Options) -> Result<Figure> {
        let process = Command::new(&*options.program)
            .stdin(Stdio::piped())
            .args(options.args.iter().map(|arg| &**arg))
            .stdout(options.output.stdio())
            .stderr(options.output.stdio())
            .spawn()
            .map_err(|inner| Error::Launch {
                program: options.program.to_path_buf(),
                inner,
            })?;

        debug!(
            "Spawned {:?} with pid {}",
            options.program,
            process.id()
        );

        Ok(Figure {
            data_files: Vec::new(),
            echo: Box::new(io::stdout()),
            interactive: options.interactive,
            plot_count: 0,
            process: Some(process),
            replot: options.replot,
            script: String::new(),
            verbose: options.verbose,
        })
    }

    /// Redirects the verbose echo of commands, stdout by default
    pub fn echo_to<W>(&mut self, sink: W) -> &mut Figure
    where
        W: Write + Send + 'static,
    {
        self.echo = Box::new(sink);
        self
    }

    /// Issues a `set` command, e.g. `figure.set("xlabel 'x'")`
    pub fn set(&mut self, setting: &str) -> Result<&mut Figure> {
        self.emit(format!("set {}", setting))
    }

    /// Issues an `unset` command, e.g. `figure.unset("border")`
    pub fn unset(&mut self, setting: &str) -> Result<&mut Figure> {
        self.emit(format!("unset {}", setting))
    }

    /// Issues an arbitrary command
    pub fn command(&mut self, command: &str) -> Result<&mut Figure> {
        self.emit(command.to_owned())
    }

    /// Issues a 2D `plot` command (or `replot`, see [`Replot`])
    pub fn plot(&mut self, plot: Plot) -> Result<&mut Figure> {
        self.draw(Kind::Plot, plot)
    }

    /// Issues a 3D `splot` command (or `replot`, see [`Replot`])
    pub fn splot(&mut self, plot: Plot) -> Result<&mut Figure> {
        self.draw(Kind::Splot, plot)
    }

    /// Sends the buffered commands to gnuplot, then waits for a line on stdin if the figure is
    /// interactive
    pub fn show(&mut self) -> Result<()> {
        self.flush()?;

        if self.interactive {
            let stdin = io::stdin();
            pause(&mut stdin.lock())?;
        }

        Ok(())
    }

    /// Removes the data files, asks gnuplot to quit and kills the process without waiting for it
    ///
    /// Closing an already closed figure does nothing.
    pub fn close(&mut self) {
        let mut process = match self.process.take() {
            Some(process) => process,
            None => return,
        };

        // Data files are deleted on drop
        self.data_files.clear();
        self.script.clear();

        // Without an explicit quit the plot window may outlive the process
        if let Some(mut stdin) = process.stdin.take() {
            if let Err(e) = stdin.write_all(b"q\n").and_then(|_| stdin.flush()) {
                debug!("Failed to send quit to gnuplot: {}", e);
            }
        }

        if let Err(e) = process.kill() {
            debug!("Failed to kill gnuplot (pid {}): {}", process.id(), e);
        }

        match process.try_wait() {
            Ok(Some(status)) => debug!("gnuplot (pid {}) exited: {}", process.id(), status),
            Ok(None) => debug!("gnuplot (pid {}) still terminating", process.id()),
            Err(e) => error!("Failed to poll gnuplot (pid {}): {}", process.id(), e),
        }
    }

    /// Writes the commands that haven't been sent yet into `sink`
    pub fn dump<W>(&self, sink: &mut W) -> io::Result<&Figure>
    where
        W: io::Write,
    {
        sink.write_all(self.script.as_bytes())?;
        Ok(self)
    }

    /// The commands that haven't been sent yet, one per line
    pub fn pending(&self) -> &str {
        &self.script
    }

    /// Number of plot commands issued so far
    pub fn plot_count(&self) -> usize {
        self.plot_count
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.process.is_none()
    }

    /// Paths of the data files owned by this figure
    pub fn data_files(&self) -> impl Iterator<Item = &Path> {
        self.data_files.iter().map(DataFile::path)
    }

    fn emit(&mut self, line: String) -> Result<&mut Figure> {
        if self.is_closed() {
            return Err(Error::Closed);
        }

        if self.verbose {
            writeln!(self.echo, "{}", line)?;
        }

        self.script.push_str(&line);
        self.script.push('\n');
        Ok(self)
    }

    fn draw(&mut self, kind: Kind, plot: Plot) -> Result<&mut Figure> {
        if self.is_closed() {
            return Err(Error::Closed);
        }

        let resolved = plot.resolve(kind)?;
        let head = match resolved.source {
            Source::Expression(expression) => expression,
            Source::Columns(columns) => {
                let columns = columns.iter().map(Vec::as_slice).collect::<Vec<_>>();
                let file = DataFile::save(&columns)?;
                let quoted = file.quoted();
                self.data_files.push(file);
                quoted
            }
        };

        let keyword = kind.keyword(self.replot, self.plot_count);
        let command = plot::assemble(keyword, &head, &resolved.tokens);

        self.emit(command)?;
        self.plot_count += 1;
        Ok(self)
    }

    fn flush(&mut self) -> Result<()> {
        let process = self.process.as_mut().ok_or(Error::Closed)?;
        let stdin = process.stdin.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::BrokenPipe, "gnuplot stdin is not piped")
        })?;

        stdin.write_all(self.script.as_bytes())?;
        stdin.flush()?;

        debug!(
            "Flushed {} bytes to gnuplot (pid {})",
            self.script.len(),
            process.id()
        );
        self.script.clear();
        Ok(())
    }
}

impl Drop for Figure {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sends the buffered commands of every figure, in order, then waits once for a line on stdin
/// if `interactive`
///
/// Figures flushed before a failing one stay flushed.
pub fn show_many<'a, I>(figures: I, interactive: bool) -> Result<()>
where
    I: IntoIterator<Item = &'a mut Figure>,
{
    for figure in figures {
        figure.flush()?;
    }

    if interactive {
        let stdin = io::stdin();
        pause(&mut stdin.lock())?;
    }

    Ok(())
}

/// Blocks until a full line (or end of input) is read from `input`
fn pause<R>(input: &mut R) -> io::Result<()>
where
    R: BufRead,
{
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// Possible errors when parsing gnuplot's version string
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// The `gnuplot` command couldn't be executed
    #[error("`gnuplot --version` failed: {0}")]
    Exec(#[source] io::Error),
    /// The `gnuplot` command returned an error message
    #[error("`gnuplot --version` failed with error message:\n{0}")]
    Error(String),
    /// The `gnuplot` command returned invalid utf-8
    #[error("`gnuplot --version` returned invalid utf-8")]
    OutputError,
    /// The `gnuplot` command returned an unparsable string
    #[error("`gnuplot --version` returned an unparsable version string: {0}")]
    ParseError(String),
}

/// Structure representing a gnuplot version number.
pub struct Version {
    /// The major version number
    pub major: usize,
    /// The minor version number
    pub minor: usize,
    /// The patch level
    pub patch: String,
}

/// Returns the version of the `gnuplot` found in `PATH`
///
/// **Note** Only the default program is probed, use [`version_of`] for a figure configured with
/// a different [`Program`]
pub fn version() -> ::std::result::Result<Version, VersionError> {
    version_of(Path::new("gnuplot"))
}

/// Returns the version reported by `program --version`
pub fn version_of(program: &Path) -> ::std::result::Result<Version, VersionError> {
    let command_output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(VersionError::Exec)?;
    if !command_output.status.success() {
        let error =
            String::from_utf8(command_output.stderr).map_err(|_| VersionError::OutputError)?;
        return Err(VersionError::Error(error));
    }

    let output = str::from_utf8(&command_output.stdout).map_err(|_| VersionError::OutputError)?;
    parse_version(output).map_err(|_| VersionError::ParseError(output.to_owned()))
}

fn parse_version(version_str: &str) -> ::std::result::Result<Version, Option<ParseIntError>> {
    let mut words = version_str.split_whitespace().skip(1);
    let mut version = words.next().ok_or(None)?.split('.');
    let major = version.next().ok_or(None)?.parse()?;
    let minor = version.next().ok_or(None)?.parse()?;
    let patchlevel = words.nth(1).ok_or(None)?.to_owned();

    Ok(Version {
        major,
        minor,
        patch: patchlevel,
    })
}
