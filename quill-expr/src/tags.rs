//! The tag vocabulary understood by the built-in rule set.

pub const NUMBER: &str = "Math.Number";
pub const INTERNAL_NUMBER: &str = "Math.InternalNumber";
pub const INFINITY: &str = "Math.Infinity";
pub const IMAGINARY_UNIT: &str = "Math.ImaginaryUnit";
pub const ERROR: &str = "Error";
pub const LIST: &str = "List.List";

pub const NEGATIVE: &str = "Math.Arithmetic.Negative";
pub const ADDITION: &str = "Math.Arithmetic.Addition";
pub const MULTIPLICATION: &str = "Math.Arithmetic.Multiplication";
pub const DIVISION: &str = "Math.Arithmetic.Division";
pub const EXPONENTIATION: &str = "Math.Arithmetic.Exponentiation";

pub const DIV: &str = "Math.Arithmetic.Div";
pub const MOD: &str = "Math.Arithmetic.Mod";
pub const DIV_MOD: &str = "Math.Arithmetic.DivMod";

pub const FLOOR: &str = "Math.Arithmetic.Floor";
pub const CEILING: &str = "Math.Arithmetic.Ceiling";
pub const TRUNCATION: &str = "Math.Arithmetic.Truncation";
pub const ROUNDING: &str = "Math.Arithmetic.Rounding";
pub const ROUND_TO_INTEGER: &str = "Math.Arithmetic.RoundToInteger";
pub const ROUND_TO_DECIMAL_PLACES: &str = "Math.Arithmetic.RoundToDecimalPlaces";
pub const ROUND_TO_PRECISION: &str = "Math.Arithmetic.RoundToPrecision";

pub const SQUARE_ROOT: &str = "Math.Arithmetic.SquareRoot";
pub const ABSOLUTE_VALUE: &str = "Math.Arithmetic.AbsoluteValue";
pub const GCD: &str = "Math.Arithmetic.GreatestCommonDivisor";
pub const RANDOM: &str = "Math.Arithmetic.Random";
pub const RANDOM_IN_RANGE: &str = "Math.Arithmetic.RandomInRange";

pub const SINE: &str = "Math.Trigonometry.Sine";
pub const COSINE: &str = "Math.Trigonometry.Cosine";
pub const TANGENT: &str = "Math.Trigonometry.Tangent";
pub const COTANGENT: &str = "Math.Trigonometry.Cotangent";
pub const SECANT: &str = "Math.Trigonometry.Secant";
pub const COSECANT: &str = "Math.Trigonometry.Cosecant";
pub const ARC_SINE: &str = "Math.Trigonometry.ArcSine";
pub const ARC_COSINE: &str = "Math.Trigonometry.ArcCosine";
pub const ARC_TANGENT: &str = "Math.Trigonometry.ArcTangent";
pub const ARC_COTANGENT: &str = "Math.Trigonometry.ArcCotangent";
pub const ARC_SECANT: &str = "Math.Trigonometry.ArcSecant";
pub const ARC_COSECANT: &str = "Math.Trigonometry.ArcCosecant";
pub const ARC_TANGENT2: &str = "Math.Trigonometry.ArcTangent2";

pub const HYPERBOLIC_SINE: &str = "Math.Trigonometry.HyperbolicSine";
pub const HYPERBOLIC_COSINE: &str = "Math.Trigonometry.HyperbolicCosine";
pub const HYPERBOLIC_TANGENT: &str = "Math.Trigonometry.HyperbolicTangent";
pub const HYPERBOLIC_COTANGENT: &str = "Math.Trigonometry.HyperbolicCotangent";
pub const HYPERBOLIC_SECANT: &str = "Math.Trigonometry.HyperbolicSecant";
pub const HYPERBOLIC_COSECANT: &str = "Math.Trigonometry.HyperbolicCosecant";
pub const INVERSE_HYPERBOLIC_SINE: &str = "Math.Trigonometry.InverseHyperbolicSine";
pub const INVERSE_HYPERBOLIC_COSINE: &str = "Math.Trigonometry.InverseHyperbolicCosine";
pub const INVERSE_HYPERBOLIC_TANGENT: &str = "Math.Trigonometry.InverseHyperbolicTangent";
pub const INVERSE_HYPERBOLIC_COTANGENT: &str = "Math.Trigonometry.InverseHyperbolicCotangent";
pub const INVERSE_HYPERBOLIC_SECANT: &str = "Math.Trigonometry.InverseHyperbolicSecant";
pub const INVERSE_HYPERBOLIC_COSECANT: &str = "Math.Trigonometry.InverseHyperbolicCosecant";

pub const EXPONENTIAL: &str = "Math.Transcendental.Exponential";
pub const NATURAL_LOGARITHM: &str = "Math.Transcendental.NaturalLogarithm";
