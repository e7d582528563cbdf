// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Expression builders shared by the BGP policies

use model::OriginType;
use model::policy::{BooleanExpr, Statement, StaticStatement, WithEnvironment};

/// Wrap `expr` so that it is evaluated while writing intermediate BGP attributes.
/// When it holds, those attributes become readable and the route gets `origin`.
#[must_use]
pub fn bgp_redistribute_with_environment(expr: BooleanExpr, origin: OriginType) -> BooleanExpr {
    BooleanExpr::with_environment(WithEnvironment {
        expr,
        pre: vec![StaticStatement::SetWriteIntermediateBgpAttributes.into()],
        post: vec![StaticStatement::UnsetWriteIntermediateBgpAttributes.into()],
        post_true: vec![
            StaticStatement::SetReadIntermediateBgpAttributes.into(),
            Statement::SetOrigin(origin),
        ],
    })
}
