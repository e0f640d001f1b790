use rstest::fixture;

use crate::AcronymDefinition;
use crate::DefinitionRegistry;

pub const DEFINITIONS: &str = r"% Acronyms used throughout the thesis.
\DeclareAcronym{api}{
    short = {API},
    long  = {Application Programming Interface},
    tag   = tech
}

\DeclareAcronym{cpu}{
    short = {CPU},
    long  = {Central Processing Unit},
    tag   = hardware
}

\DeclareAcronym{gpu}{
    short = {gpu},
    long  = {graphics processing unit},
    tag   = hardware
}
";

#[fixture]
pub fn api_registry() -> DefinitionRegistry {
	DefinitionRegistry::from_definitions([AcronymDefinition::new(
		"api",
		"API",
		"Application Programming Interface",
	)])
}

#[fixture]
pub fn sample_registry() -> DefinitionRegistry {
	DefinitionRegistry::parse(DEFINITIONS)
}
