//! Plot requests

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::value::Value;

/// Arguments of a `plot` or `splot` command
///
/// `x` is either a gnuplot expression passed through verbatim (`"sin(x)"`) or the first column
/// of an array-style plot. Positional arguments and named arguments are appended to the command
/// in the order they were added; named arguments render as `key value`.
///
/// For array-style plots the remaining coordinates (`y`, and `z` for `splot`) come from the named
/// argument of the same name if there is one, otherwise from the next positional argument that
/// holds samples.
#[derive(Clone, Debug)]
pub struct Plot {
    x: Value,
    args: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl Plot {
    /// Starts a plot request
    pub fn new<X>(x: X) -> Plot
    where
        X: Into<Value>,
    {
        Plot {
            x: x.into(),
            args: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Appends a positional argument
    pub fn arg<V>(mut self, value: V) -> Plot
    where
        V: Into<Value>,
    {
        self.args.push(value.into());
        self
    }

    /// Appends a named argument, rendered as `key value`
    pub fn named<K, V>(mut self, key: K, value: V) -> Plot
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.named.push((key.into(), value.into()));
        self
    }

    /// Splits the request into what comes right after the plot keyword and the trailing tokens
    pub(crate) fn resolve(self, kind: Kind) -> Result<Resolved> {
        let Plot { x, args, mut named } = self;
        let mut args = args.into_iter().enumerate().collect::<VecDeque<_>>();

        let source = match x {
            Value::Text(expression) => Source::Expression(expression),
            Value::Samples(xs) => {
                let mut columns = vec![xs];

                for &coordinate in kind.coordinates() {
                    let column = if let Some(i) = named.iter().position(|(k, _)| k == coordinate)
                    {
                        match named.remove(i).1 {
                            Value::Samples(samples) => samples,
                            Value::Text(_) => {
                                return Err(Error::TypeMismatch {
                                    argument: coordinate.to_owned(),
                                })
                            }
                        }
                    } else {
                        match args.pop_front() {
                            Some((_, Value::Samples(samples))) => samples,
                            _ => return Err(Error::MissingCoordinate(coordinate)),
                        }
                    };

                    columns.push(column);
                }

                Source::Columns(columns)
            }
        };

        let mut tokens = Vec::with_capacity(args.len() + named.len());

        for (i, arg) in args {
            match arg {
                Value::Text(text) => tokens.push(text),
                Value::Samples(_) => {
                    return Err(Error::TypeMismatch {
                        argument: format!("positional argument {}", i + 1),
                    })
                }
            }
        }

        for (key, value) in named {
            match value {
                Value::Text(text) => tokens.push(format!("{} {}", key, text)),
                Value::Samples(_) => return Err(Error::TypeMismatch { argument: key }),
            }
        }

        Ok(Resolved { source, tokens })
    }
}

/// `plot` (2D) or `splot` (3D)
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Kind {
    Plot,
    Splot,
}

impl Kind {
    fn coordinates(self) -> &'static [&'static str] {
        match self {
            Kind::Plot => &["y"],
            Kind::Splot => &["y", "z"],
        }
    }

    /// Picks the command keyword: `replot` only after the first plot of a figure with replot on
    pub(crate) fn keyword(self, replot: bool, plot_count: usize) -> &'static str {
        if replot && plot_count > 0 {
            "replot"
        } else {
            match self {
                Kind::Plot => "plot",
                Kind::Splot => "splot",
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Source {
    Expression(String),
    Columns(Vec<Vec<f64>>),
}

#[derive(Debug)]
pub(crate) struct Resolved {
    pub source: Source,
    pub tokens: Vec<String>,
}

/// Joins the command, every part followed by a single space
pub(crate) fn assemble(keyword: &str, head: &str, tokens: &[String]) -> String {
    let mut command = format!("{} {} ", keyword, head);

    for token in tokens {
        command.push_str(token);
        command.push(' ');
    }

    command
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck::quickcheck;

    fn columns(resolved: &Resolved) -> &[Vec<f64>] {
        match resolved.source {
            Source::Columns(ref columns) => columns,
            Source::Expression(_) => panic!("expected columns"),
        }
    }

    #[test]
    fn expression_passes_through() {
        let resolved = Plot::new("sin(x)")
            .named("dashtype", 0)
            .resolve(Kind::Plot)
            .unwrap();

        assert_eq!(resolved.source, Source::Expression("sin(x)".into()));
        assert_eq!(resolved.tokens, vec!["dashtype 0"]);
    }

    #[test]
    fn positional_y() {
        let resolved = Plot::new(vec![0, 1, 3])
            .arg(vec![0, 2, 6])
            .arg("u 1:2 w lp")
            .resolve(Kind::Plot)
            .unwrap();

        assert_eq!(columns(&resolved), &[vec![0., 1., 3.], vec![0., 2., 6.]]);
        assert_eq!(resolved.tokens, vec!["u 1:2 w lp"]);
    }

    #[test]
    fn named_y_wins_over_positional() {
        let err = Plot::new(vec![0., 1.])
            .arg(vec![5., 5.])
            .named("y", vec![0., 0.5])
            .resolve(Kind::Plot)
            .unwrap_err();

        match err {
            Error::TypeMismatch { argument } => assert_eq!(argument, "positional argument 1"),
            other => panic!("unexpected error: {}", other),
        }

        let resolved = Plot::new(vec![0., 1.])
            .named("w", "lines")
            .named("y", vec![0., 0.5])
            .named("linecolor", "'red'")
            .resolve(Kind::Plot)
            .unwrap();

        assert_eq!(columns(&resolved)[1], vec![0., 0.5]);
        assert_eq!(resolved.tokens, vec!["w lines", "linecolor 'red'"]);
    }

    #[test]
    fn missing_y() {
        assert!(matches!(
            Plot::new(vec![0., 1.]).resolve(Kind::Plot),
            Err(Error::MissingCoordinate("y"))
        ));
        assert!(matches!(
            Plot::new(vec![0., 1.]).arg("w l").resolve(Kind::Plot),
            Err(Error::MissingCoordinate("y"))
        ));
    }

    #[test]
    fn splot_takes_three_columns() {
        let resolved = Plot::new(vec![0., 1.])
            .arg(vec![2., 3.])
            .named("z", vec![4., 5.])
            .arg("w p")
            .resolve(Kind::Splot)
            .unwrap();

        assert_eq!(
            columns(&resolved),
            &[vec![0., 1.], vec![2., 3.], vec![4., 5.]]
        );
        assert_eq!(resolved.tokens, vec!["w p"]);

        assert!(matches!(
            Plot::new(vec![0.]).arg(vec![1.]).resolve(Kind::Splot),
            Err(Error::MissingCoordinate("z"))
        ));
    }

    #[test]
    fn named_coordinate_must_hold_samples() {
        assert!(matches!(
            Plot::new(vec![0.]).named("y", "oops").resolve(Kind::Plot),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn text_plot_rejects_samples() {
        assert!(matches!(
            Plot::new("x**2").arg(vec![1., 2.]).resolve(Kind::Plot),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            Plot::new("x**2").named("y", vec![1.]).resolve(Kind::Plot),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn assemble_keeps_order_and_trailing_space() {
        let tokens = vec!["u 1:2".to_owned(), "w lp".to_owned(), "lw 2".to_owned()];
        assert_eq!(
            assemble("plot", "'data.dat'", &tokens),
            "plot 'data.dat' u 1:2 w lp lw 2 "
        );
        assert_eq!(assemble("plot", "sin(x)", &[]), "plot sin(x) ");
    }

    quickcheck! {
        fn first_plot_never_replots(replot: bool) -> bool {
            Kind::Plot.keyword(replot, 0) == "plot" && Kind::Splot.keyword(replot, 0) == "splot"
        }

        fn later_plots_follow_replot_flag(replot: bool, count: usize) -> bool {
            let count = count.saturating_add(1);
            let expected = if replot { "replot" } else { "plot" };
            Kind::Plot.keyword(replot, count) == expected
        }
    }
}
