//! Composition of agent-visible states from raw observations.
use crate::{error::EpisimError, Obs, State};
use anyhow::Result;
use ndarray::{ArrayD, Axis, IxDyn, SliceInfoElem};

/// Converts raw observations into [`State`]s, stacking the last `stack_depth` frames.
///
/// Axes of length 1 in observations are removed. With `stack_depth == 1` the state is
/// the (squeezed) observation itself. Otherwise a trailing temporal axis of length
/// `stack_depth` is appended, holding frames from the oldest to the newest.
///
/// ```
/// use episim_core::StateCompositor;
/// use ndarray::{arr1, ArrayD};
///
/// let compositor = StateCompositor::new(3).unwrap();
/// let obs: ArrayD<f64> = arr1(&[0.0, 1.0, 2.0, 3.0]).into_dyn();
/// let state = compositor.initial_state(&obs).unwrap();
/// assert_eq!(state.shape(), &[4, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct StateCompositor {
    stack_depth: usize,
}

impl StateCompositor {
    /// Constructs a compositor.
    ///
    /// Fails if `stack_depth` is zero.
    pub fn new(stack_depth: usize) -> Result<Self, EpisimError> {
        if stack_depth < 1 {
            return Err(EpisimError::config(
                "the number of stacked frames must be at least 1",
            ));
        }
        Ok(Self { stack_depth })
    }

    /// Returns the number of stacked frames.
    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }

    /// Returns the shape of the states composed from observations like `obs`.
    pub fn state_shape<O: Obs>(&self, obs: &O) -> Result<Vec<usize>> {
        Ok(self.initial_state(obs)?.shape().to_vec())
    }

    /// Composes the state at the beginning of an episode.
    ///
    /// All frames are copies of `obs`.
    pub fn initial_state<O: Obs>(&self, obs: &O) -> Result<State> {
        let frame = Self::frame(obs)?;
        if self.stack_depth == 1 {
            return Ok(State(frame));
        }

        let mut shape = frame.shape().to_vec();
        shape.push(self.stack_depth);
        let mut arr = ArrayD::<f32>::zeros(IxDyn(&shape));
        for mut dst in arr.axis_iter_mut(Axis(frame.ndim())) {
            dst.assign(&frame);
        }
        Ok(State(arr))
    }

    /// Composes the state following `state` after observing `obs`.
    pub fn next_state<O: Obs>(&self, state: &State, obs: &O) -> Result<State> {
        let mut next = state.clone();
        self.advance(&mut next, obs)?;
        Ok(next)
    }

    /// Drops the oldest frame of `state` and appends `obs` as the newest one, in place.
    pub fn advance<O: Obs>(&self, state: &mut State, obs: &O) -> Result<()> {
        let frame = Self::frame(obs)?;
        let frame_shape = match self.stack_depth {
            1 => state.shape(),
            _ => &state.shape()[..state.shape().len().saturating_sub(1)],
        };
        if frame_shape != frame.shape() {
            return Err(EpisimError::ObservationShapeError {
                expected: frame_shape.to_vec(),
                found: frame.shape().to_vec(),
            }
            .into());
        }

        if self.stack_depth == 1 {
            state.0 = frame;
            return Ok(());
        }

        // Shift frames, frame(j - 1) <- frame(j) for j = 1, ..., (stack_depth - 1)
        let arr = &mut state.0;
        let n_axes = frame.ndim();
        for j in 1..self.stack_depth {
            let dst_slice = Self::s(n_axes, j - 1);
            let src_slice = Self::s(n_axes, j);
            let (mut dst, src) = arr.multi_slice_mut((dst_slice.as_slice(), src_slice.as_slice()));
            dst.assign(&src);
        }
        arr.index_axis_mut(Axis(n_axes), self.stack_depth - 1)
            .assign(&frame);
        Ok(())
    }

    /// Create slice for a dynamic array: equivalent to `arr[..., j]` in numpy,
    /// where `n_axes` is the number of axes before the temporal axis.
    fn s(n_axes: usize, j: usize) -> Vec<SliceInfoElem> {
        let (start, end, step) = (0, None, 1);
        let mut slicer = vec![SliceInfoElem::Slice { start, end, step }; n_axes];
        slicer.push(SliceInfoElem::Index(j as isize));
        slicer
    }

    /// Converts an observation to `f32` and removes its axes of length 1.
    fn frame<O: Obs>(obs: &O) -> Result<ArrayD<f32>> {
        let arr = obs.to_array();
        let shape: Vec<usize> = arr.shape().iter().copied().filter(|&d| d != 1).collect();
        if shape.len() == arr.ndim() {
            return Ok(arr);
        }
        Ok(arr.into_shape(IxDyn(&shape))?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::{arr1, arr2, Array, ArrayD};

    fn obs(v: &[f64]) -> ArrayD<f64> {
        arr1(v).into_dyn()
    }

    #[test]
    fn test_zero_stack_depth() {
        let err = StateCompositor::new(0).unwrap_err();
        assert!(matches!(err, EpisimError::ConfigurationError(_)));
    }

    #[test]
    fn test_no_stacking() -> Result<()> {
        let compositor = StateCompositor::new(1)?;
        let o0 = obs(&[0.5, -1.0, 2.0, 3.5]);
        let o1 = obs(&[1.5, 0.25, -2.0, 0.0]);
        let s0 = compositor.initial_state(&o0)?;
        assert_eq!(s0.shape(), &[4]);

        let s1 = compositor.next_state(&s0, &o1)?;
        assert_eq!(s1.as_array(), &o1.mapv(|v| v as f32));
        Ok(())
    }

    #[test]
    fn test_initial_state_replicates_observation() -> Result<()> {
        let compositor = StateCompositor::new(3)?;
        let o0 = obs(&[1.0, 2.0, 3.0, 4.0]);
        let s0 = compositor.initial_state(&o0)?;
        assert_eq!(s0.shape(), &[4, 3]);
        for i in 0..3 {
            assert_eq!(s0.frame(i).unwrap(), arr1(&[1f32, 2.0, 3.0, 4.0]).into_dyn());
        }
        Ok(())
    }

    #[test]
    fn test_frame_order() -> Result<()> {
        let k = 3;
        let compositor = StateCompositor::new(k)?;
        let observations: Vec<ArrayD<f64>> = (0..6)
            .map(|t| obs(&[t as f64, 10.0 * t as f64]))
            .collect();

        let mut state = compositor.initial_state(&observations[0])?;
        for n in 1..observations.len() {
            state = compositor.next_state(&state, &observations[n])?;
            for i in 0..k {
                // Indices before step 0 refer to the replicas of the initial observation
                let t = (n + i + 1).saturating_sub(k);
                let expected = observations[t].mapv(|v| v as f32);
                assert_eq!(state.frame(i).unwrap(), expected);
            }
        }
        Ok(())
    }

    #[test]
    fn test_next_state_is_pure() -> Result<()> {
        let compositor = StateCompositor::new(4)?;
        let s0 = compositor.initial_state(&obs(&[1.0, 2.0]))?;
        let o1 = obs(&[3.0, 4.0]);
        let s1 = compositor.next_state(&s0, &o1)?;
        let s1_ = compositor.next_state(&s0, &o1)?;
        assert_eq!(s1, s1_);
        assert_eq!(s0, compositor.initial_state(&obs(&[1.0, 2.0]))?);
        Ok(())
    }

    #[test]
    fn test_degenerate_axes_are_removed() -> Result<()> {
        let compositor = StateCompositor::new(2)?;
        let o0: ArrayD<f32> = arr2(&[[1f32], [2.0], [3.0]]).into_dyn();
        let s0 = compositor.initial_state(&o0)?;
        assert_eq!(s0.shape(), &[3, 2]);

        let o1: ArrayD<f32> = arr2(&[[4f32], [5.0], [6.0]]).into_dyn();
        let s1 = compositor.next_state(&s0, &o1)?;
        assert_eq!(s1.shape(), s0.shape());
        assert_eq!(s1.frame(1).unwrap(), arr1(&[4f32, 5.0, 6.0]).into_dyn());
        Ok(())
    }

    #[test]
    fn test_frame_out_of_range() -> Result<()> {
        let compositor = StateCompositor::new(2)?;
        let s0 = compositor.initial_state(&obs(&[1.0, 2.0]))?;
        assert!(s0.frame(1).is_some());
        assert!(s0.frame(2).is_none());

        // A single-element observation without stacking leaves a 0-dimensional state
        let s0 = StateCompositor::new(1)?.initial_state(&obs(&[7.0]))?;
        assert!(s0.shape().is_empty());
        assert!(s0.frame(0).is_none());
        Ok(())
    }

    #[test]
    fn test_image_frames() -> Result<()> {
        let compositor = StateCompositor::new(2)?;
        let o0 = Array::from_shape_fn((2, 3), |(i, j)| (i * 3 + j) as u8).into_dyn();
        let o1 = o0.mapv(|v| v + 100);
        let s1 = compositor.next_state(&compositor.initial_state(&o0)?, &o1)?;
        assert_eq!(s1.shape(), &[2, 3, 2]);
        assert_eq!(s1.frame(0).unwrap(), o0.mapv(|v| v as f32));
        assert_eq!(s1.frame(1).unwrap(), o1.mapv(|v| v as f32));
        Ok(())
    }

    #[test]
    fn test_shape_mismatch() -> Result<()> {
        let compositor = StateCompositor::new(2)?;
        let s0 = compositor.initial_state(&obs(&[1.0, 2.0]))?;
        let err = compositor.next_state(&s0, &obs(&[1.0, 2.0, 3.0])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EpisimError>(),
            Some(EpisimError::ObservationShapeError { .. })
        ));
        Ok(())
    }
}
