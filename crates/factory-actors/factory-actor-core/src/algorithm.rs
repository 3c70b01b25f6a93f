use anyhow::Context;
use anyhow::Result;
use factory_scheduling_environment::SchedulingEnvironment;
use tracing::Level;
use tracing::event;

use crate::traits::Parameters;
use crate::traits::Solution;

/// Container shared by every algorithm of the system. Each actor wraps it in
/// a newtype that derefs to it and implements its own procedure on top.
pub struct Algorithm<S, P, I>
where
    S: Solution<Parameters = P>,
    P: Parameters,
{
    pub solution_intermediate: I,
    pub solution: S,
    pub parameters: P,
}

pub struct AlgorithmBuilder<S, P, I>
where
    S: Solution<Parameters = P>,
    P: Parameters,
{
    solution_intermediate: I,
    solution: Option<S>,
    parameters: Option<P>,
}

impl<S, P, I> Algorithm<S, P, I>
where
    S: Solution<Parameters = P>,
    P: Parameters,
    I: Default,
{
    pub fn builder() -> AlgorithmBuilder<S, P, I>
    {
        AlgorithmBuilder {
            solution_intermediate: I::default(),
            solution: None,
            parameters: None,
        }
    }
}

impl<S, P, I> AlgorithmBuilder<S, P, I>
where
    S: Solution<Parameters = P>,
    P: Parameters,
{
    pub fn build<Alg>(self) -> Result<Alg>
    where
        Algorithm<S, P, I>: Into<Alg>,
    {
        let algorithm_inner = Algorithm {
            solution_intermediate: self.solution_intermediate,
            solution: self
                .solution
                .context("Call `parameters_and_solution` or `parameters` before `build`")?,
            parameters: self
                .parameters
                .context("Call `parameters_and_solution` or `parameters` before `build`")?,
        };

        event!(
            Level::DEBUG,
            algorithm = std::any::type_name::<Alg>(),
            "algorithm built"
        );
        Ok(algorithm_inner.into())
    }

    pub fn parameters_and_solution(
        self,
        scheduling_environment: &SchedulingEnvironment,
    ) -> Result<Self>
    {
        let parameters = P::from_source(scheduling_environment).with_context(|| {
            format!(
                "Could not derive {} from the scheduling environment",
                std::any::type_name::<P>()
            )
        })?;

        Ok(self.parameters(parameters))
    }

    /// Uses parameters that did not come from a scheduling environment. The
    /// solution is initialized from them.
    pub fn parameters(mut self, parameters: P) -> Self
    {
        self.solution = Some(S::new(&parameters));
        self.parameters = Some(parameters);
        self
    }

    pub fn solution_intermediate(mut self, solution_intermediate: I) -> Self
    {
        self.solution_intermediate = solution_intermediate;
        self
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    struct CountParameters(usize);

    impl Parameters for CountParameters
    {
        fn from_source(scheduling_environment: &SchedulingEnvironment) -> Result<Self>
        {
            Ok(CountParameters(scheduling_environment.number_of_workers()))
        }
    }

    struct CountSolution(Vec<usize>);

    impl Solution for CountSolution
    {
        type Parameters = CountParameters;

        fn new(parameters: &Self::Parameters) -> Self
        {
            CountSolution(vec![0; parameters.0])
        }
    }

    struct CountAlgorithm(Algorithm<CountSolution, CountParameters, u64>);

    impl From<Algorithm<CountSolution, CountParameters, u64>> for CountAlgorithm
    {
        fn from(value: Algorithm<CountSolution, CountParameters, u64>) -> Self
        {
            CountAlgorithm(value)
        }
    }

    #[test]
    fn test_build_derives_solution_from_parameters() -> Result<()>
    {
        let count_algorithm: CountAlgorithm =
            Algorithm::<CountSolution, CountParameters, u64>::builder()
                .parameters(CountParameters(3))
                .solution_intermediate(7)
                .build()?;

        assert_eq!(count_algorithm.0.solution.0, vec![0, 0, 0]);
        assert_eq!(count_algorithm.0.solution_intermediate, 7);
        Ok(())
    }

    #[test]
    fn test_build_without_parameters_is_an_error()
    {
        let result: Result<CountAlgorithm> =
            Algorithm::<CountSolution, CountParameters, u64>::builder().build();

        assert!(result.is_err());
    }

    #[test]
    fn test_parameters_from_an_empty_environment() -> Result<()>
    {
        let scheduling_environment = SchedulingEnvironment::builder().build()?;

        let count_algorithm: CountAlgorithm =
            Algorithm::<CountSolution, CountParameters, u64>::builder()
                .parameters_and_solution(&scheduling_environment)?
                .build()?;

        assert!(count_algorithm.0.solution.0.is_empty());
        Ok(())
    }
}
