use std::fs::read_to_string;
use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Error};
use clap::{Args, ValueEnum};

use crate::ast;
use crate::compile::{self, CompileOptions};
use crate::dgns::DiagnosticContext;
use crate::ir;

#[derive(Args, Debug, Clone)]
pub struct SpecOpt {
    /// Declaration file to compile
    #[arg(long, default_value = "memview.spec")]
    pub spec: PathBuf,
    /// YAML file with the compile options
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Maximum number of dimensions of a view, overriding the config file
    #[arg(long)]
    pub max_dims: Option<usize>,
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorOpt,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOpt {
    Auto,
    Always,
    Never,
}

impl SpecOpt {
    pub fn options(&self) -> Result<CompileOptions, Error> {
        let mut options = match &self.config {
            Some(path) => CompileOptions::from_yaml_file(path)?,
            None => CompileOptions::default(),
        };
        if let Some(max_dims) = self.max_dims {
            options.max_dims = max_dims;
        }
        debug!("compile options: {:?}", options);
        Ok(options)
    }

    /// Parses and compiles the declaration file, printing the diagnostics to `stderr`.
    pub fn load(
        &self,
        stderr: &mut dyn io::Write,
    ) -> Result<(ir::Spec, DiagnosticContext), Error> {
        match self.color {
            ColorOpt::Auto => (),
            ColorOpt::Always => colored::control::set_override(true),
            ColorOpt::Never => colored::control::set_override(false),
        }

        let options = self.options()?;
        let source = read_to_string(&self.spec)
            .with_context(|| format!("cannot read file {}", self.spec.display()))?;
        let mut dgns = DiagnosticContext::new(&self.spec, source.clone());

        let ast: ast::Spec = match syn::parse_str(&source) {
            Ok(ast) => ast,
            Err(e) => {
                dgns.error(&e.to_string(), e.span());
                dgns.print(stderr)?;
                return Err(anyhow!("cannot parse {}", self.spec.display()));
            }
        };

        let ir = compile::compile(&ast, &mut dgns, options);
        dgns.print(stderr)?;
        let ir = ir.map_err(|_| anyhow!("compilation stopped due to previous errors"))?;

        Ok((ir, dgns))
    }
}
