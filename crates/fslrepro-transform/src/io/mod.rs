/// FSL FLIRT matrix reader module.
pub mod fsl;
