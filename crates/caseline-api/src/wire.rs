// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request bodies that exist only on the wire.

use caseline_core::CaseId;
use caseline_core::catalog::Tool;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaseRef<'a> {
    pub case_id: &'a CaseId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileSpec<'a> {
    pub file_name: &'a str,
    pub file_type: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileRef<'a> {
    pub file_name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ToolCreate<'a> {
    pub tool: &'a Tool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToolUpdate<'a> {
    pub updated_tool: &'a Tool,
    pub name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatTurn<'a> {
    pub session_id: &'a str,
    pub text: &'a str,
}

#[derive(Serialize)]
pub(crate) struct UtteranceRequest<'a> {
    pub intent: &'a str,
}
