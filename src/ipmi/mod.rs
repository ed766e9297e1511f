/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
pub mod context;
pub mod intf;
pub mod ipmi;
pub mod strings;
pub mod vita;
