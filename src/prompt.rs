use std::io::{self, BufRead, Write};
use std::num::ParseFloatError;

use beamx::{tube, BeamSpec};
use thiserror::Error;
use uom::si::f64::{Length, MassDensity, Pressure};
use uom::si::length::meter;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::pressure::pascal;

/// Entered diameters are divided by this to get metres.
const CENTIMETRES_PER_METRE: f64 = 100.0;
/// Entered thicknesses are divided by this to get metres.
const MILLIMETRES_PER_METRE: f64 = 1000.0;
/// Entered moduli are multiplied by this to get pascals.
const PASCALS_PER_GIGAPASCAL: f64 = 1.0e9;

/// Error returned while reading beam parameters from the user.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Returned when the terminal cannot be read or written.
    #[error("cannot talk to the terminal: {0}")]
    Io(#[from] io::Error),
    /// Returned when input ends before a required answer.
    #[error("input ended while waiting for the {field}")]
    EndOfInput {
        /// The value that was being asked for.
        field: &'static str,
    },
    /// Returned when a numeric answer does not parse.
    #[error("{value:?} is not a valid number for the {field}")]
    InvalidNumber {
        /// The value that was being asked for.
        field: &'static str,
        /// The text the user entered.
        value: String,
        /// Parser failure.
        #[source]
        source: ParseFloatError,
    },
}

/// Line-oriented question and answer session over any reader and writer.
pub struct Prompter<R, W> {
    /// Source of answers.
    input: R,
    /// Destination for questions and reports.
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a session reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for every parameter of one beam and convert it to SI units.
    ///
    /// The diameter is entered in centimetres, the thickness in millimetres
    /// and the elastic modulus in gigapascals.
    pub fn read_beam(&mut self) -> Result<BeamSpec, PromptError> {
        let material = self.ask("material name", "Enter the material name: ")?;
        let length = Length::new::<meter>(
            self.ask_number("length", "Enter the length of the beam (in meters): ")?,
        );
        // Divide rather than scale by 0.01 / 0.001: 35 cm must be exactly 0.35 m.
        let diameter = Length::new::<meter>(
            self.ask_number("diameter", "Enter the diameter of the beam (in cm): ")?
                / CENTIMETRES_PER_METRE,
        );
        let thickness = Length::new::<meter>(
            self.ask_number("thickness", "Enter the thickness of the beam (in mm): ")?
                / MILLIMETRES_PER_METRE,
        );
        let elastic_modulus = Pressure::new::<pascal>(
            self.ask_number(
                "modulus of elasticity",
                "Enter the modulus of elasticity (in GPa): ",
            )? * PASCALS_PER_GIGAPASCAL,
        );
        let density = MassDensity::new::<kilogram_per_cubic_meter>(self.ask_number(
            "density",
            "Enter the density of the material (in kg/m^3): ",
        )?);

        Ok(BeamSpec {
            material: Some(material),
            length: length.get::<meter>(),
            section: tube(diameter.get::<meter>(), thickness.get::<meter>()),
            elastic_modulus: elastic_modulus.get::<pascal>(),
            density: density.get::<kilogram_per_cubic_meter>(),
        })
    }

    /// Ask whether to run another calculation. End of input counts as "no".
    pub fn ask_continue(&mut self) -> Result<bool, PromptError> {
        match self.ask(
            "answer",
            "Do you want to calculate another deflection? (yes/no): ",
        ) {
            Ok(answer) => Ok(answer.trim().eq_ignore_ascii_case("yes")),
            Err(PromptError::EndOfInput { .. }) => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Write free text to the output.
    pub fn say(&mut self, text: &str) -> Result<(), PromptError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Print `question` and return the answer without its line terminator.
    fn ask(&mut self, field: &'static str, question: &str) -> Result<String, PromptError> {
        self.say(question)?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(PromptError::EndOfInput { field });
        }
        let trimmed = answer.trim_end_matches(['\n', '\r']).len();
        answer.truncate(trimmed);
        Ok(answer)
    }

    fn ask_number(&mut self, field: &'static str, question: &str) -> Result<f64, PromptError> {
        let answer = self.ask(field, question)?;
        answer
            .trim()
            .parse()
            .map_err(|source| PromptError::InvalidNumber {
                field,
                value: answer.clone(),
                source,
            })
    }
}
