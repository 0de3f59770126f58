//! Shows a function next to a data series, then two figures side by side.
//!
//! Requires `gnuplot` in `PATH`. Press enter to move on after each window appears.

use gnupipe::prelude::*;

fn main() -> Result<(), Error> {
    let mut figure = Figure::new(Options::default().set(Replot(true)).set(Verbose(true)))?;
    figure
        .set("grid")?
        .set("key outside top horizontal")?
        .plot(Plot::new("sin(x)").named("dashtype", 0))?
        .plot(
            Plot::new(vec![0., 1.])
                .named("y", vec![0., 0.5])
                .named("w", "lines")
                .named("linecolor", "'red'"),
        )?;
    figure.show()?;
    figure.close();

    let mut first = Figure::new(Options::default())?;
    let mut second = Figure::new(Options::default())?;

    first.plot(Plot::new("x**2"))?;
    second
        .set("hidden3d")?
        .set("isosamples 50")?
        .splot(Plot::new("sin(x)*cos(y)"))?;

    show_many(vec![&mut first, &mut second], true)
}
